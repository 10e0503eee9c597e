use serde::{Deserialize, Serialize};
use std::fmt;

/// Slippage tolerance in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slippage(u16);

impl Slippage {
    pub fn from_bps(bps: u16) -> Self {
        Self(bps)
    }

    pub fn bps(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Slippage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}
