//! Pickup-point domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another pickup point.
//! - `city` is one of a closed set; there is no free-form city value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a pickup point.
pub type PointId = Uuid;

/// City a pickup point operates in.
///
/// The set is closed; adding a city is a schema-level decision, not data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
}

/// A physical location at which receptions occur.
///
/// Immutable after creation; re-registration is an administrative concern
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupPoint {
    /// Stable generated id.
    pub id: PointId,
    /// Registration time in epoch milliseconds.
    pub registered_at: i64,
    pub city: City,
}

impl PickupPoint {
    /// Creates a pickup point with a generated stable id.
    pub fn register(city: City, registered_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            registered_at,
            city,
        }
    }
}
