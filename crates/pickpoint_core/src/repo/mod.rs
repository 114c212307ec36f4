//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query and transaction details from service
//!   orchestration.
//!
//! # Invariants
//! - Lifecycle writes re-check their preconditions inside the same
//!   transaction that performs the mutation.
//! - Repository APIs return semantic errors (conflict, precondition) in
//!   addition to DB transport errors.

pub mod point_repo;
pub mod reception_repo;
pub mod report_repo;
