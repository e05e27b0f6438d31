//! Market State
//!
//! Snapshot handed to an agent each time it is asked to decide.

use super::{Price, Round};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market conditions as seen by one agent at one turn.
///
/// A fresh value is built by the market on every query, so an agent acting
/// late in a round sees the trades of the agents that acted before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketState {
    /// Current unit price
    pub price: Price,
    /// Price at the end of the previous round
    pub previous_price: Price,
    /// Units available for purchase
    pub stock: u64,
    /// Current round (0-based)
    pub iteration: Round,
    /// Total rounds in the run
    pub total_iterations: Round,
}

impl MarketState {
    pub fn new(
        price: Price,
        previous_price: Price,
        stock: u64,
        iteration: Round,
        total_iterations: Round,
    ) -> Self {
        Self {
            price,
            previous_price,
            stock,
            iteration,
            total_iterations,
        }
    }

    /// Relative price change since the previous round (0.01 = +1%).
    ///
    /// Zero when there is no previous price to compare against.
    pub fn price_change_percentage(&self) -> Decimal {
        if self.previous_price.is_zero() {
            return Decimal::ZERO;
        }
        (self.price - self.previous_price) / self.previous_price
    }

    /// Rounds left including the current one
    pub fn rounds_remaining(&self) -> Round {
        self.total_iterations.saturating_sub(self.iteration)
    }
}
