//! Agent Framework
//!
//! Traits and types for the trading agents of the card market.
//!
//! # Agent Types
//!
//! - **RandomTrader**: Buys, sells or holds with equal probability (baseline volume)
//! - **TrendFollower**: Buys after a rise of 1% or more (amplifies rallies)
//! - **AntiTrendTrader**: Buys after a drop of 1% or more (buys the dip)
//! - **SmartTrader**: Phased planner that must end the run holding no cards

mod agent;
mod ledger;
mod strategy;

pub use agent::{Agent, AgentId, AgentKind, Fill, Strategy};
pub use ledger::Ledger;
pub use strategy::AgentStrategy;

// Agent implementations
pub mod anti_trend;
pub mod random;
pub mod smart;
pub mod trend;

// Re-export agent types and configs
pub use anti_trend::AntiTrendTrader;
pub use random::RandomTrader;
pub use smart::{Phase, SmartTrader, SmartTraderConfig};
pub use trend::{TrendConfig, TrendFollower};
