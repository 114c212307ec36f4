//! Reception lifecycle use-case service.
//!
//! # Responsibility
//! - Provide the lifecycle entry points callers use.
//! - Delegate transactional invariant enforcement to the repository.
//! - Record metric events for committed mutations.
//!
//! # Invariants
//! - Service APIs never bypass the repository's transaction boundaries.
//! - Metric events are recorded only after the mutation committed.

use crate::metrics::{MetricEvent, MetricRecorder};
use crate::model::point::PointId;
use crate::model::reception::{Category, Item, Reception};
use crate::repo::reception_repo::{ReceptionRepository, RepoResult};

/// Use-case facade over the reception lifecycle engine.
///
/// Holds explicit references to its collaborators: the storage capability
/// and the observability recorder.
pub struct ReceptionService<R: ReceptionRepository, M: MetricRecorder> {
    repo: R,
    recorder: M,
}

impl<R: ReceptionRepository, M: MetricRecorder> ReceptionService<R, M> {
    /// Creates a service from a repository and a metric recorder.
    pub fn new(repo: R, recorder: M) -> Self {
        Self { repo, recorder }
    }

    /// Opens a reception for the pickup point.
    ///
    /// # Contract
    /// - Fails with a conflict error when a reception is already open.
    /// - `opened_at` is the caller-supplied epoch-millisecond timestamp.
    pub fn open_reception(
        &mut self,
        pickup_point_id: PointId,
        opened_at: i64,
    ) -> RepoResult<Reception> {
        let reception = self.repo.open_reception(pickup_point_id, opened_at)?;
        self.recorder.record(MetricEvent::ReceptionOpened);
        Ok(reception)
    }

    /// Scans one item into the pickup point's open reception.
    ///
    /// # Contract
    /// - Fails with a precondition error when no reception is open.
    pub fn add_item(
        &mut self,
        pickup_point_id: PointId,
        category: Category,
        scanned_at: i64,
    ) -> RepoResult<Item> {
        let item = self.repo.add_item(pickup_point_id, category, scanned_at)?;
        self.recorder.record(MetricEvent::ItemAdded);
        Ok(item)
    }

    /// Removes the most recently scanned item of the open reception.
    ///
    /// # Contract
    /// - Fails with a precondition error when no reception is open or the
    ///   open reception has no items.
    pub fn remove_last_item(&mut self, pickup_point_id: PointId) -> RepoResult<()> {
        self.repo.remove_last_item(pickup_point_id)
    }

    /// Closes the pickup point's open reception.
    ///
    /// # Contract
    /// - Fails with a precondition error when no reception is open or the
    ///   open reception is empty.
    pub fn close_reception(&mut self, pickup_point_id: PointId) -> RepoResult<Reception> {
        self.repo.close_reception(pickup_point_id)
    }
}
