//! Domain types and math for concentrated-liquidity positions.
//!
//! This crate holds the pure, I/O-free parts of the workspace:
//! - Tick and Q64.64 sqrt-price conversions
//! - Token amounts implied by a liquidity delta
//! - Price and slippage value objects

/// Error types.
pub mod error;
/// Fixed-point price and liquidity math.
pub mod math;
/// Value objects.
pub mod value_objects;

pub use error::MathError;
