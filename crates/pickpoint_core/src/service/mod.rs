//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Attach the injected metric recorder to successful mutations.

pub mod point_service;
pub mod reception_service;
pub mod report_service;
