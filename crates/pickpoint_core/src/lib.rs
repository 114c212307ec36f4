//! Core domain logic for the pickup-point reception service.
//! This crate is the single source of truth for the reception lifecycle
//! invariants.

pub mod db;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{init_logging, logging_status};
pub use metrics::{LogRecorder, MetricEvent, MetricRecorder, NoopRecorder};
pub use model::point::{City, PickupPoint, PointId};
pub use model::reception::{Category, Item, ItemId, Reception, ReceptionId, ReceptionStatus};
pub use repo::point_repo::{PointRepository, SqlitePointRepository};
pub use repo::reception_repo::{
    ErrorKind, ReceptionRepository, RepoError, RepoResult, SqliteReceptionRepository,
};
pub use repo::report_repo::{
    PickupPointSummary, ReceptionSummary, ReportRepository, SqliteReportRepository, SummaryQuery,
};
pub use service::point_service::PointService;
pub use service::reception_service::ReceptionService;
pub use service::report_service::ReportService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
