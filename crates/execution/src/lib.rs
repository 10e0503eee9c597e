//! Batch execution of liquidity increases.
//!
//! This crate provides:
//! - Run configuration and keypair loading
//! - A sequential, fail-fast orchestrator
//! - Per-run reports with the failing request and stage

/// Prelude module for convenient imports.
pub mod prelude;

/// Run configuration.
pub mod config;
/// Error types.
pub mod error;
/// Batch orchestration.
pub mod orchestrator;

pub use error::ExecutionError;
