//! Pickup-point use-case service.

use crate::metrics::{MetricEvent, MetricRecorder};
use crate::model::point::{City, PickupPoint};
use crate::repo::point_repo::PointRepository;
use crate::repo::reception_repo::RepoResult;

/// Use-case facade for pickup-point registration and listing.
pub struct PointService<R: PointRepository, M: MetricRecorder> {
    repo: R,
    recorder: M,
}

impl<R: PointRepository, M: MetricRecorder> PointService<R, M> {
    pub fn new(repo: R, recorder: M) -> Self {
        Self { repo, recorder }
    }

    /// Registers a pickup point in one of the supported cities.
    pub fn create_point(&mut self, city: City, registered_at: i64) -> RepoResult<PickupPoint> {
        let point = self.repo.create_point(city, registered_at)?;
        self.recorder.record(MetricEvent::PointRegistered);
        Ok(point)
    }

    /// Lists all known pickup points ordered by registration time.
    pub fn list_points(&self) -> RepoResult<Vec<PickupPoint>> {
        self.repo.list_points()
    }
}
