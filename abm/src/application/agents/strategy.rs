//! Strategy dispatch
//!
//! One tagged variant per strategy type, each holding its own private state.

use super::{
    AgentKind, AntiTrendTrader, Fill, Ledger, RandomTrader, SmartTrader, Strategy, TrendFollower,
};
use cardmarket_core::{Decision, MarketState};
use rand::Rng;

#[derive(Debug, Clone)]
pub enum AgentStrategy {
    Random(RandomTrader),
    Trend(TrendFollower),
    AntiTrend(AntiTrendTrader),
    Smart(SmartTrader),
}

impl Strategy for AgentStrategy {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        state: &MarketState,
        turn: usize,
        ledger: &Ledger,
        rng: &mut R,
    ) -> Decision {
        match self {
            AgentStrategy::Random(s) => s.decide(state, turn, ledger, rng),
            AgentStrategy::Trend(s) => s.decide(state, turn, ledger, rng),
            AgentStrategy::AntiTrend(s) => s.decide(state, turn, ledger, rng),
            AgentStrategy::Smart(s) => s.decide(state, turn, ledger, rng),
        }
    }

    fn on_fill(&mut self, fill: &Fill) {
        match self {
            AgentStrategy::Random(s) => s.on_fill(fill),
            AgentStrategy::Trend(s) => s.on_fill(fill),
            AgentStrategy::AntiTrend(s) => s.on_fill(fill),
            AgentStrategy::Smart(s) => s.on_fill(fill),
        }
    }

    fn kind(&self) -> AgentKind {
        match self {
            AgentStrategy::Random(s) => s.kind(),
            AgentStrategy::Trend(s) => s.kind(),
            AgentStrategy::AntiTrend(s) => s.kind(),
            AgentStrategy::Smart(s) => s.kind(),
        }
    }
}

impl From<RandomTrader> for AgentStrategy {
    fn from(strategy: RandomTrader) -> Self {
        AgentStrategy::Random(strategy)
    }
}

impl From<TrendFollower> for AgentStrategy {
    fn from(strategy: TrendFollower) -> Self {
        AgentStrategy::Trend(strategy)
    }
}

impl From<AntiTrendTrader> for AgentStrategy {
    fn from(strategy: AntiTrendTrader) -> Self {
        AgentStrategy::AntiTrend(strategy)
    }
}

impl From<SmartTrader> for AgentStrategy {
    fn from(strategy: SmartTrader) -> Self {
        AgentStrategy::Smart(strategy)
    }
}
