//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use clmm_liq_execution::prelude::*;
//! ```

// Config
pub use crate::config::{ConfigError, PositionRequest, RunConfig, load_keypair};

// Errors
pub use crate::error::{ExecutionError, RequestError};

// Orchestrator
pub use crate::orchestrator::{Orchestrator, RunFailure, RunReport, Stage, SubmissionOutcome};
