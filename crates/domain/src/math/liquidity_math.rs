//! Token amounts implied by a liquidity delta.
//!
//! Amounts are kept as exact ratios so callers can round up (what the pool
//! will actually debit) or down (what the caller expects) without losing the
//! information needed for slippage bounds.
//!
//! delta_0 = L * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)
//! delta_1 = L * (sqrt_b - sqrt_a)
//! with sqrt prices in Q64.64.

use crate::error::MathError;
use crate::value_objects::slippage::Slippage;
use primitive_types::U512;
use serde::{Deserialize, Serialize};

/// An exact non-negative token amount `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactAmount {
    numerator: U512,
    denominator: U512,
}

impl ExactAmount {
    /// Zero tokens.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            numerator: U512::zero(),
            denominator: U512::one(),
        }
    }

    fn new(numerator: U512, denominator: U512) -> Result<Self, MathError> {
        if denominator.is_zero() {
            return Err(MathError::DivisionByZero("exact amount"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Rounds down to whole token units.
    pub fn floor(&self) -> Result<u64, MathError> {
        to_u64(self.numerator / self.denominator)
    }

    /// Rounds up to whole token units.
    pub fn ceil(&self) -> Result<u64, MathError> {
        let rounded = (self.numerator + self.denominator - U512::one()) / self.denominator;
        to_u64(rounded)
    }

    /// Returns `floor(self * factor_bps / 10_000)`.
    pub fn scaled_floor(&self, factor_bps: u32) -> Result<u64, MathError> {
        let scaled = self.numerator * U512::from(factor_bps);
        to_u64(scaled / (self.denominator * U512::from(BPS_DENOMINATOR)))
    }

    /// True when the amount is a whole number of token units.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        (self.numerator % self.denominator).is_zero()
    }
}

const BPS_DENOMINATOR: u32 = 10_000;

fn to_u64(value: U512) -> Result<u64, MathError> {
    if value > U512::from(u64::MAX) {
        return Err(MathError::Overflow("token amount"));
    }
    Ok(value.low_u64())
}

fn sorted(sqrt_price_a: u128, sqrt_price_b: u128) -> (u128, u128) {
    if sqrt_price_a <= sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    }
}

/// Amount of token 0 spanned by `liquidity` between two sqrt prices.
pub fn get_delta_amount_0(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
) -> Result<ExactAmount, MathError> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);
    if lower == 0 {
        return Err(MathError::DivisionByZero("delta amount 0"));
    }

    let numerator = (U512::from(liquidity) * U512::from(upper - lower)) << 64;
    let denominator = U512::from(upper) * U512::from(lower);
    ExactAmount::new(numerator, denominator)
}

/// Amount of token 1 spanned by `liquidity` between two sqrt prices.
pub fn get_delta_amount_1(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
) -> Result<ExactAmount, MathError> {
    let (lower, upper) = sorted(sqrt_price_a, sqrt_price_b);
    let numerator = U512::from(liquidity) * U512::from(upper - lower);
    ExactAmount::new(numerator, U512::one() << 64)
}

/// Both token amounts for a liquidity delta at the current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityAmounts {
    pub amount_0: ExactAmount,
    pub amount_1: ExactAmount,
}

/// Splits `liquidity` over `[sqrt_price_lower, sqrt_price_upper]` at `sqrt_price_current`.
///
/// Below the range only token 0 is needed, above it only token 1, and inside it
/// the range is split at the current price.
pub fn get_amounts_for_liquidity(
    sqrt_price_current: u128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    liquidity: u128,
) -> Result<LiquidityAmounts, MathError> {
    let (lower, upper) = sorted(sqrt_price_lower, sqrt_price_upper);

    if sqrt_price_current <= lower {
        Ok(LiquidityAmounts {
            amount_0: get_delta_amount_0(lower, upper, liquidity)?,
            amount_1: ExactAmount::zero(),
        })
    } else if sqrt_price_current < upper {
        Ok(LiquidityAmounts {
            amount_0: get_delta_amount_0(sqrt_price_current, upper, liquidity)?,
            amount_1: get_delta_amount_1(lower, sqrt_price_current, liquidity)?,
        })
    } else {
        Ok(LiquidityAmounts {
            amount_0: ExactAmount::zero(),
            amount_1: get_delta_amount_1(lower, upper, liquidity)?,
        })
    }
}

/// Whole-unit bounds for one token of a liquidity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenQuote {
    /// Amount the pool will debit (exact amount rounded up).
    pub required: u64,
    /// Largest amount the caller accepts.
    pub maximum: u64,
    /// Smallest amount the caller accepts.
    pub minimum: u64,
}

impl TokenQuote {
    /// Bounds `amount` by `slippage`.
    pub fn new(amount: &ExactAmount, slippage: Slippage) -> Result<Self, MathError> {
        Ok(Self {
            required: amount.ceil()?,
            maximum: amount.scaled_floor(BPS_DENOMINATOR + u32::from(slippage.bps()))?,
            minimum: amount.scaled_floor(BPS_DENOMINATOR.saturating_sub(u32::from(slippage.bps())))?,
        })
    }

    /// True when the debit stays within the caller's maximum.
    #[must_use]
    pub fn within_tolerance(&self) -> bool {
        self.required <= self.maximum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::{Q64, get_sqrt_price_at_tick};

    #[test]
    fn test_amount_deltas() {
        // Liquidity 1000, price 1 -> 4 (sqrt 1 -> 2)
        // delta_1 = 1000 * (2 - 1) = 1000
        // delta_0 = 1000 * (1/1 - 1/2) = 500
        let dy = get_delta_amount_1(Q64, 2 * Q64, 1000).unwrap();
        assert_eq!(dy.floor().unwrap(), 1000);
        assert!(dy.is_integral());

        let dx = get_delta_amount_0(2 * Q64, Q64, 1000).unwrap();
        assert_eq!(dx.floor().unwrap(), 500);
        assert_eq!(dx.ceil().unwrap(), 500);
    }

    #[test]
    fn test_fractional_amount_rounding() {
        // 1000 * (1 - 1/1.0001^50) is about 4.9875
        let lower = get_sqrt_price_at_tick(-100).unwrap();
        let amount = get_delta_amount_1(lower, Q64, 1000).unwrap();
        assert_eq!(amount.floor().unwrap(), 4);
        assert_eq!(amount.ceil().unwrap(), 5);
        assert!(!amount.is_integral());
    }

    #[test]
    fn test_zero_sqrt_price_rejected() {
        assert_eq!(
            get_delta_amount_0(0, Q64, 1),
            Err(MathError::DivisionByZero("delta amount 0"))
        );
    }

    #[test]
    fn test_amounts_by_price_position() {
        let lower = get_sqrt_price_at_tick(-100).unwrap();
        let upper = get_sqrt_price_at_tick(100).unwrap();

        let below = get_amounts_for_liquidity(lower - 1, lower, upper, 1_000_000).unwrap();
        assert!(below.amount_0.ceil().unwrap() > 0);
        assert_eq!(below.amount_1, ExactAmount::zero());

        let inside = get_amounts_for_liquidity(Q64, lower, upper, 1_000_000).unwrap();
        assert!(inside.amount_0.ceil().unwrap() > 0);
        assert!(inside.amount_1.ceil().unwrap() > 0);

        let above = get_amounts_for_liquidity(upper, lower, upper, 1_000_000).unwrap();
        assert_eq!(above.amount_0, ExactAmount::zero());
        assert!(above.amount_1.ceil().unwrap() > 0);
    }

    #[test]
    fn test_quote_with_slippage() {
        let lower = get_sqrt_price_at_tick(-100).unwrap();
        let amount = get_delta_amount_1(lower, Q64, 1000).unwrap();

        let strict = TokenQuote::new(&amount, Slippage::from_bps(0)).unwrap();
        assert_eq!(strict.required, 5);
        assert_eq!(strict.maximum, 4);
        assert!(!strict.within_tolerance());

        let loose = TokenQuote::new(&amount, Slippage::from_bps(50)).unwrap();
        assert_eq!(loose.required, 5);
        assert_eq!(loose.maximum, 5);
        assert_eq!(loose.minimum, 4);
        assert!(loose.within_tolerance());
    }

    #[test]
    fn test_integral_amount_passes_without_slippage() {
        let amount = get_delta_amount_1(Q64, 2 * Q64, 1000).unwrap();
        let quote = TokenQuote::new(&amount, Slippage::from_bps(0)).unwrap();
        assert_eq!(quote.required, 1000);
        assert_eq!(quote.maximum, 1000);
        assert!(quote.within_tolerance());
    }
}
