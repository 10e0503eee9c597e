use crate::error::MathError;
use crate::value_objects::price::Price;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: Price,
    pub upper_price: Price,
}

impl PriceRange {
    pub fn new(lower: Price, upper: Price) -> Self {
        Self {
            lower_price: lower,
            upper_price: upper,
        }
    }

    /// Bounds of a tick range expressed as sqrt prices.
    pub fn from_sqrt_prices(
        sqrt_price_lower_x64: u128,
        sqrt_price_upper_x64: u128,
        decimals_0: u8,
        decimals_1: u8,
    ) -> Result<Self, MathError> {
        Ok(Self::new(
            Price::from_sqrt_price_x64(sqrt_price_lower_x64, decimals_0, decimals_1)?,
            Price::from_sqrt_price_x64(sqrt_price_upper_x64, decimals_0, decimals_1)?,
        ))
    }

    pub fn contains(&self, price: Price) -> bool {
        price.value >= self.lower_price.value && price.value <= self.upper_price.value
    }
}
