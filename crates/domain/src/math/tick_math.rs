//! Conversions between tick indices and Q64.64 sqrt prices.
//!
//! A tick `t` maps to the price `1.0001^t`; the pool stores the square root of
//! that price as an unsigned 64.64 fixed-point number.

use crate::error::MathError;

/// Lowest tick a position can reference.
pub const MIN_TICK: i32 = -443_636;
/// Highest tick a position can reference.
pub const MAX_TICK: i32 = -MIN_TICK;

/// Sqrt price at [`MIN_TICK`].
pub const MIN_SQRT_PRICE_X64: u128 = 4_295_048_016;
/// Sqrt price at [`MAX_TICK`].
pub const MAX_SQRT_PRICE_X64: u128 = 79_226_673_521_066_979_257_578_248_091;

/// `2^64`, i.e. `1.0` in Q64.64.
pub const Q64: u128 = 1 << 64;

/// `2^64 / sqrt(1.0001)^(2^i)` for `i` in `1..19`. Entry 0 is applied separately.
const INV_SQRT_FACTORS: [u128; 18] = [
    0xfff9_7272_373d_4000,
    0xfff2_e50f_5f65_7000,
    0xffe5_caca_7e10_f000,
    0xffcb_9843_d60f_7000,
    0xff97_3b41_fa98_e800,
    0xff2e_a164_66c9_b000,
    0xfe5d_ee04_6a9a_3800,
    0xfcbe_86c7_900b_b000,
    0xf987_a725_3ac6_5800,
    0xf339_2b08_22bb_6000,
    0xe715_9475_a2c6_f000,
    0xd097_f3bd_fd25_4000,
    0xa9f7_4646_2d9f_8000,
    0x70d8_69a1_56f3_1c00,
    0x31be_135f_97ed_3200,
    0x09aa_508b_5b85_a500,
    0x005d_6af8_dedc_582c,
    0x0000_2216_e584_f5fa,
];

const INV_SQRT_1_0001: u128 = 0xfffc_b933_bd6f_b800;

/// Returns true when `tick` lies in `[MIN_TICK, MAX_TICK]`.
#[must_use]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Returns the Q64.64 sqrt price for `tick`.
///
/// The running ratio never exceeds `2^64` and every factor is below `2^64`,
/// so each product fits in a `u128`.
///
/// # Errors
/// Returns [`MathError::TickOutOfRange`] outside `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<u128, MathError> {
    if !is_valid_tick(tick) {
        return Err(MathError::TickOutOfRange(tick));
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        INV_SQRT_1_0001
    } else {
        Q64
    };
    for (bit, factor) in INV_SQRT_FACTORS.iter().enumerate() {
        if abs_tick & (0x2 << bit) != 0 {
            ratio = (ratio * factor) >> 64;
        }
    }

    if tick > 0 {
        ratio = u128::MAX / ratio;
    }
    Ok(ratio)
}

/// Returns the greatest tick whose sqrt price is less than or equal to `sqrt_price_x64`.
///
/// # Errors
/// Returns [`MathError::SqrtPriceOutOfRange`] outside
/// `[MIN_SQRT_PRICE_X64, MAX_SQRT_PRICE_X64]`.
pub fn get_tick_at_sqrt_price(sqrt_price_x64: u128) -> Result<i32, MathError> {
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err(MathError::SqrtPriceOutOfRange(sqrt_price_x64));
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        // upper midpoint so `low = mid` always makes progress
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_price_at_tick(mid)? <= sqrt_price_x64 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}
