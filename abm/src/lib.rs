//! Agent-Based Model (ABM) for the card market
//!
//! One hundred agents trade a single commodity over a fixed number of rounds.
//! Every buy pushes the price up and every sell pushes it down, so the price
//! path emerges from the mix of strategies.

pub mod application;
pub mod domain;

// Re-export key types at crate root
pub use application::agents::{
    Agent, AgentId, AgentKind, AgentStrategy, AntiTrendTrader, Ledger, Phase, RandomTrader,
    SmartTrader, SmartTraderConfig, Strategy, TrendConfig, TrendFollower,
};
pub use application::simulation::{
    AgentSummary, KindSummary, RoundResult, Simulation, SimulationReport, SmartSummary,
};
pub use domain::{Market, MarketStatistics};
