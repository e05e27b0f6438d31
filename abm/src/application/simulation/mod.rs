//! Simulation Framework
//!
//! Provides the round loop and end-of-run reporting for the card market.
//!
//! # Architecture
//!
//! Each round the runner:
//! - Shuffles the acting order
//! - Hands every agent a fresh market snapshot (decide)
//! - Validates and applies the decision to the agent's ledger and the market
//! - Notifies the strategy of executed trades (on_fill)
//! - Closes the round (volume, price history)

mod report;
mod runner;

pub use report::{AgentSummary, KindSummary, SimulationReport, SmartSummary};
pub use runner::{RoundResult, Simulation};
