//! Reporting use-case service.
//!
//! # Responsibility
//! - Normalize caller-supplied pagination before the repository layer.
//! - Delegate snapshot assembly to the reporting repository.

use crate::repo::reception_repo::RepoResult;
use crate::repo::report_repo::{PickupPointSummary, ReportRepository, SummaryQuery};

const SUMMARY_DEFAULT_LIMIT: u32 = 10;
const SUMMARY_LIMIT_MAX: u32 = 30;

/// Use-case facade for the point-in-time aggregation view.
pub struct ReportService<R: ReportRepository> {
    repo: R,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns one summary per pickup point in the requested window.
    ///
    /// `start`/`end` are inclusive epoch-millisecond bounds. `page` clamps
    /// to >= 1; `limit` defaults to 10 and clamps to [1, 30].
    pub fn point_summaries(
        &mut self,
        start: Option<i64>,
        end: Option<i64>,
        page: u32,
        limit: Option<u32>,
    ) -> RepoResult<Vec<PickupPointSummary>> {
        let query = SummaryQuery {
            start,
            end,
            page: normalize_page(page),
            limit: normalize_limit(limit),
        };
        self.repo.point_summaries(&query)
    }
}

/// Normalizes a 1-based page number.
pub fn normalize_page(page: u32) -> u32 {
    page.max(1)
}

/// Normalizes a page size according to the reporting contract.
pub fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => SUMMARY_DEFAULT_LIMIT,
        Some(value) if value > SUMMARY_LIMIT_MAX => SUMMARY_LIMIT_MAX,
        Some(value) => value,
        None => SUMMARY_DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_limit, normalize_page};

    #[test]
    fn page_clamps_to_one() {
        assert_eq!(normalize_page(0), 1);
        assert_eq!(normalize_page(1), 1);
        assert_eq!(normalize_page(7), 7);
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(normalize_limit(None), 10);
        assert_eq!(normalize_limit(Some(0)), 10);
        assert_eq!(normalize_limit(Some(15)), 15);
        assert_eq!(normalize_limit(Some(31)), 30);
    }
}
