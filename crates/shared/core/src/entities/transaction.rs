use super::Side;
use crate::values::{Price, Round};
use serde::{Deserialize, Serialize};

/// One executed trade in an agent's ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub side: Side,
    /// Price paid or received
    pub price: Price,
    /// Round in which the trade happened
    pub round: Round,
}

impl Transaction {
    pub fn new(side: Side, price: Price, round: Round) -> Self {
        Self { side, price, round }
    }

    pub fn buy(price: Price, round: Round) -> Self {
        Self::new(Side::Buy, price, round)
    }

    pub fn sell(price: Price, round: Round) -> Self {
        Self::new(Side::Sell, price, round)
    }
}
