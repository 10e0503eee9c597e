pub mod price;
pub mod price_range;
pub mod slippage;

pub use price::Price;
pub use price_range::PriceRange;
pub use slippage::Slippage;
