//! Anti-Trend Trader Agent
//!
//! Bets on overreaction correction: buys the dip.
//! Role: Dampens sell-offs.
//!
//! Mirror of [`TrendFollower`](super::TrendFollower): a drop of `threshold`
//! or more triggers the buy branch, anything else the occasional sell.

use super::{AgentKind, Ledger, Strategy, TrendConfig};
use cardmarket_core::{Decision, MarketState};
use rand::Rng;

/// Stateless dip buyer
#[derive(Debug, Clone, Default)]
pub struct AntiTrendTrader {
    config: TrendConfig,
}

impl AntiTrendTrader {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }
}

impl Strategy for AntiTrendTrader {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        state: &MarketState,
        _turn: usize,
        _ledger: &Ledger,
        rng: &mut R,
    ) -> Decision {
        self.config.react(self.config.is_dip(state), rng)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::AntiTrend
    }
}
