//! Card Market Core Domain
//!
//! Pure domain types for the card market simulation.
//! This crate contains no randomness and no simulation state, and is 100% unit testable.
//! File I/O is limited to [`SimulationConfig::from_file`].

pub mod config;
pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use config::{Population, REQUIRED_POPULATION, SimulationConfig};
pub use entities::{Decision, Side, Transaction};
pub use error::{ConfigError, ConfigResult};
pub use values::{MarketState, Money, Price, Round};
