//! Application layer: Use cases and orchestration
//!
//! Contains:
//! - **agents**: Trading agents and their strategies (Random, Trend, AntiTrend, Smart)
//! - **simulation**: Simulation that runs the rounds and builds the report

pub mod agents;
pub mod simulation;
