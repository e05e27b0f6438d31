use super::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an agent wants to do on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Buy one card at the current price
    Buy,
    /// Sell one card at the current price
    Sell,
    /// Do nothing this turn
    Hold,
}

impl Decision {
    /// Trade side this decision maps to, `None` for hold
    pub fn side(&self) -> Option<Side> {
        match self {
            Decision::Buy => Some(Side::Buy),
            Decision::Sell => Some(Side::Sell),
            Decision::Hold => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Buy => write!(f, "buy"),
            Decision::Sell => write!(f, "sell"),
            Decision::Hold => write!(f, "hold"),
        }
    }
}
