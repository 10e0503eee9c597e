use crate::error::MathError;
use crate::math::tick_math::{Q64, get_sqrt_price_at_tick};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Converts a Q64.64 sqrt price into a human-scale price of token 0 in token 1.
/// price = (sqrt_price / 2^64)^2 * 10^(decimals_0 - decimals_1)
pub fn sqrt_price_x64_to_price(
    sqrt_price_x64: u128,
    decimals_0: u8,
    decimals_1: u8,
) -> Result<Decimal, MathError> {
    let sqrt = Decimal::from_u128(sqrt_price_x64).ok_or(MathError::Overflow("sqrt price"))?;
    let q64 = Decimal::from_u128(Q64).ok_or(MathError::Overflow("q64"))?;

    let ratio = sqrt
        .checked_div(q64)
        .ok_or(MathError::DivisionByZero("sqrt price"))?;
    let raw_price = ratio
        .checked_mul(ratio)
        .ok_or(MathError::Overflow("price square"))?;

    shift_decimals(raw_price, i32::from(decimals_0) - i32::from(decimals_1))
}

/// Returns the decimal price at `tick` for the given token precisions.
pub fn tick_to_price(tick: i32, decimals_0: u8, decimals_1: u8) -> Result<Decimal, MathError> {
    let sqrt_price_x64 = get_sqrt_price_at_tick(tick)?;
    sqrt_price_x64_to_price(sqrt_price_x64, decimals_0, decimals_1)
}

fn shift_decimals(value: Decimal, exponent: i32) -> Result<Decimal, MathError> {
    let mut shifted = value;
    for _ in 0..exponent.unsigned_abs() {
        shifted = if exponent > 0 {
            shifted
                .checked_mul(Decimal::TEN)
                .ok_or(MathError::Overflow("decimal shift"))?
        } else {
            shifted
                .checked_div(Decimal::TEN)
                .ok_or(MathError::DivisionByZero("decimal shift"))?
        };
    }
    Ok(shifted)
}
