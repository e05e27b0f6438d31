//! Random Trader Agent
//!
//! Buys, sells or holds with equal probability.
//! Role: Provides baseline volume with no directional bias.

use super::{AgentKind, Ledger, Strategy};
use cardmarket_core::{Decision, MarketState};
use rand::Rng;

/// Memoryless uniform trader
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTrader;

impl Strategy for RandomTrader {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        _state: &MarketState,
        _turn: usize,
        _ledger: &Ledger,
        rng: &mut R,
    ) -> Decision {
        let choice = rng.r#gen::<f64>();
        if choice < 1.0 / 3.0 {
            Decision::Buy
        } else if choice < 2.0 / 3.0 {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Random
    }
}
