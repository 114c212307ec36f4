//! Reception and item domain models.
//!
//! # Responsibility
//! - Define the reception lifecycle record and the items scanned into it.
//!
//! # Invariants
//! - A reception has exactly two states: `InProgress` and `Closed`.
//! - At most one reception per pickup point is `InProgress` at any time;
//!   the lifecycle engine enforces this transactionally.
//! - Items are immutable once created; the only permitted deletion is
//!   "remove the most recently scanned item of the open reception".

use crate::model::point::PointId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a reception.
pub type ReceptionId = Uuid;

/// Stable identifier of a scanned item.
pub type ItemId = Uuid;

/// Lifecycle state of a reception.
///
/// There are no other states and no transition besides
/// `InProgress -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    InProgress,
    Closed,
}

/// Category of a scanned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Shoes,
}

/// A bounded session during which items are scanned in at one pickup point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reception {
    /// Stable generated id.
    pub id: ReceptionId,
    /// Owning pickup point.
    pub pickup_point_id: PointId,
    /// Creation time in epoch milliseconds; the ordering key for "latest".
    pub started_at: i64,
    pub status: ReceptionStatus,
}

impl Reception {
    /// Creates a fresh `InProgress` reception with a generated id.
    ///
    /// Only the lifecycle engine calls this; a reception never comes into
    /// existence already closed.
    pub fn open(pickup_point_id: PointId, started_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            pickup_point_id,
            started_at,
            status: ReceptionStatus::InProgress,
        }
    }

    /// Returns whether this reception still accepts items.
    pub fn is_open(&self) -> bool {
        self.status == ReceptionStatus::InProgress
    }
}

/// A single scanned unit belonging to exactly one reception.
///
/// `pickup_point_id` is denormalized from the owning reception for query
/// convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable generated id.
    pub id: ItemId,
    pub reception_id: ReceptionId,
    pub pickup_point_id: PointId,
    pub category: Category,
    /// Scan time in epoch milliseconds; the ordering key for "last item".
    pub scanned_at: i64,
}

impl Item {
    /// Creates an item record with a generated id.
    pub fn scanned(
        reception_id: ReceptionId,
        pickup_point_id: PointId,
        category: Category,
        scanned_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            reception_id,
            pickup_point_id,
            category,
            scanned_at,
        }
    }
}
