//! Fixed-point math for concentrated-liquidity pools.

/// Token amounts implied by a liquidity delta.
pub mod liquidity_math;
/// Q64.64 sqrt price to decimal price conversions.
pub mod sqrt_price_math;
/// Tick to sqrt price conversions.
pub mod tick_math;
