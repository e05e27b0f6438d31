//! Agent Trait
//!
//! Core trait that every trading strategy implements, and the agent that
//! pairs a strategy with its ledger.

use super::{AgentStrategy, Ledger};
use cardmarket_core::{Decision, MarketState, Money, Price, Round, Side, Transaction};
use rand::Rng;
use serde::Serialize;

/// Unique identifier for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AgentId(pub usize);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strategy type tag, used to group agents in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgentKind {
    Random,
    Trend,
    AntiTrend,
    Smart,
}

impl AgentKind {
    /// All kinds, in population order
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Random,
        AgentKind::Trend,
        AgentKind::AntiTrend,
        AgentKind::Smart,
    ];

    /// Display name (for logging/reports)
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Random => "RandomAgent",
            AgentKind::Trend => "TrendAgent",
            AgentKind::AntiTrend => "AntiTrendAgent",
            AgentKind::Smart => "SmartAgent",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fill notification for an executed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub side: Side,
    /// Execution price
    pub price: Price,
    pub round: Round,
    /// Cards held just before the trade
    pub cards_before: u32,
}

/// Core trait for all strategies
///
/// A strategy looks at the market snapshot and its own agent's ledger and
/// returns one decision. It never touches the market or the ledger itself;
/// the simulation applies the decision and reports back through `on_fill`.
pub trait Strategy {
    /// Called once per round on the agent's turn
    fn decide<R: Rng + ?Sized>(
        &mut self,
        state: &MarketState,
        turn: usize,
        ledger: &Ledger,
        rng: &mut R,
    ) -> Decision;

    /// Called after one of our trades was executed
    fn on_fill(&mut self, _fill: &Fill) {}

    /// Strategy type tag
    fn kind(&self) -> AgentKind;
}

/// A market participant: identity, ledger and strategy
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    ledger: Ledger,
    strategy: AgentStrategy,
}

impl Agent {
    pub fn new(id: AgentId, initial_balance: Money, strategy: impl Into<AgentStrategy>) -> Self {
        Self {
            id,
            ledger: Ledger::new(initial_balance),
            strategy: strategy.into(),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn kind(&self) -> AgentKind {
        self.strategy.kind()
    }

    pub fn strategy(&self) -> &AgentStrategy {
        &self.strategy
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance()
    }

    pub fn cards(&self) -> u32 {
        self.ledger.cards()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Ask the strategy for this turn's decision
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        state: &MarketState,
        turn: usize,
        rng: &mut R,
    ) -> Decision {
        self.strategy.decide(state, turn, &self.ledger, rng)
    }

    pub fn can_buy(&self, price: Price) -> bool {
        self.ledger.can_buy(price)
    }

    pub fn can_sell(&self) -> bool {
        self.ledger.can_sell()
    }

    /// Buy one card at `price`. Returns false (no change) if cash is short.
    pub fn buy(&mut self, price: Price, round: Round) -> bool {
        self.execute(Side::Buy, price, round)
    }

    /// Sell one card at `price`. Returns false (no change) without cards.
    pub fn sell(&mut self, price: Price, round: Round) -> bool {
        self.execute(Side::Sell, price, round)
    }

    pub fn total_value(&self, current_price: Price) -> Money {
        self.ledger.total_value(current_price)
    }

    fn execute(&mut self, side: Side, price: Price, round: Round) -> bool {
        let cards_before = self.ledger.cards();
        let filled = match side {
            Side::Buy => self.ledger.buy(price, round),
            Side::Sell => self.ledger.sell(price, round),
        };

        if filled {
            self.strategy.on_fill(&Fill {
                side,
                price,
                round,
                cards_before,
            });
        }
        filled
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(id={}, balance=${:.2}, cards={})",
            self.kind(),
            self.id,
            self.balance(),
            self.cards()
        )
    }
}
