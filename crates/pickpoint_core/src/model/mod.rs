//! Domain model for pickup points, receptions and scanned items.
//!
//! # Responsibility
//! - Define the canonical records mutated by the reception lifecycle engine.
//! - Keep enumerations (city, status, category) closed; storage mapping
//!   lives in the repository layer.
//!
//! # Invariants
//! - Every record is identified by a stable generated UUID.
//! - A reception belongs to exactly one pickup point, an item to exactly
//!   one reception.

pub mod point;
pub mod reception;
