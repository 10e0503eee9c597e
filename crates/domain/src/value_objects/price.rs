use crate::error::MathError;
use crate::math::sqrt_price_math::sqrt_price_x64_to_price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price of token 0 denominated in token 1, adjusted for both tokens' decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Builds a price from a Q64.64 sqrt price.
    pub fn from_sqrt_price_x64(
        sqrt_price_x64: u128,
        decimals_0: u8,
        decimals_1: u8,
    ) -> Result<Self, MathError> {
        sqrt_price_x64_to_price(sqrt_price_x64, decimals_0, decimals_1).map(Self::new)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.normalize())
    }
}
