//! Run configuration
//!
//! A single immutable [`SimulationConfig`] is built once (defaults or JSON),
//! validated once, and passed by reference into the market and the simulation.
//!
//! ```json
//! {
//!   "initial_price": 200.0,
//!   "total_iterations": 500,
//!   "population": { "random": 51, "trend": 24, "anti_trend": 24, "smart": 1 },
//!   "seed": 42
//! }
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::values::{Money, Price, Round};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of agents every run must contain
pub const REQUIRED_POPULATION: usize = 100;

/// Number of agents of each strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Population {
    pub random: usize,
    pub trend: usize,
    pub anti_trend: usize,
    pub smart: usize,
}

impl Population {
    pub fn new(random: usize, trend: usize, anti_trend: usize, smart: usize) -> Self {
        Self {
            random,
            trend,
            anti_trend,
            smart,
        }
    }

    pub fn total(&self) -> usize {
        self.random + self.trend + self.anti_trend + self.smart
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new(51, 24, 24, 1)
    }
}

/// Root configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Cash each agent starts with
    pub initial_balance: Money,
    /// Cards available in the market at start
    pub initial_stock: u64,
    /// Price at round 0
    pub initial_price: Price,
    /// Relative price increase applied per accepted buy
    pub price_increase_rate: Decimal,
    /// Relative price decrease applied per accepted sell
    pub price_decrease_rate: Decimal,
    /// Number of rounds in the run
    pub total_iterations: Round,
    /// Agent mix
    pub population: Population,
    /// Random seed (for reproducibility)
    pub seed: Option<u64>,
    /// Log progress every N rounds (0 = never)
    pub progress_interval: Round,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_balance: dec!(1000.0),
            initial_stock: 100_000,
            initial_price: dec!(200.0),
            price_increase_rate: dec!(0.005), // 0.5% per buy
            price_decrease_rate: dec!(0.005), // 0.5% per sell
            total_iterations: 1000,
            population: Population::default(),
            seed: None,
            progress_interval: 100,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every invariant the simulation relies on.
    ///
    /// Counts are unsigned, so a negative count never gets this far: it is
    /// rejected by [`SimulationConfig::from_json`] as a parse error.
    pub fn validate(&self) -> ConfigResult<()> {
        let total = self.population.total();
        if total != REQUIRED_POPULATION {
            return Err(ConfigError::PopulationTotal {
                expected: REQUIRED_POPULATION,
                actual: total,
            });
        }

        if self.total_iterations == 0 {
            return Err(ConfigError::NonPositiveIterations);
        }

        if self.initial_price <= Decimal::ZERO {
            return Err(ConfigError::InvalidParameter {
                name: "initial_price",
                reason: format!("must be positive, got {}", self.initial_price),
            });
        }

        if self.initial_balance < Decimal::ZERO {
            return Err(ConfigError::InvalidParameter {
                name: "initial_balance",
                reason: format!("must not be negative, got {}", self.initial_balance),
            });
        }

        check_rate("price_increase_rate", self.price_increase_rate)?;
        // A decrease rate of 1 or more would drive the price to zero or below
        check_rate("price_decrease_rate", self.price_decrease_rate)?;

        Ok(())
    }
}

fn check_rate(name: &'static str, rate: Decimal) -> ConfigResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be in [0, 1), got {}", rate),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_population(
        random: usize,
        trend: usize,
        anti_trend: usize,
        smart: usize,
    ) -> SimulationConfig {
        SimulationConfig {
            population: Population::new(random, trend, anti_trend, smart),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.population.total(), REQUIRED_POPULATION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_population_must_total_hundred() {
        assert!(with_population(51, 24, 24, 1).validate().is_ok());

        let err = with_population(50, 24, 24, 1).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::PopulationTotal {
                expected: 100,
                actual: 99
            }
        );

        assert!(with_population(52, 24, 24, 1).validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = SimulationConfig {
            total_iterations: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::NonPositiveIterations
        );
    }

    #[test]
    fn test_invalid_prices_and_rates_rejected() {
        let config = SimulationConfig {
            initial_price: Decimal::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "initial_price",
                ..
            })
        ));

        let config = SimulationConfig {
            price_decrease_rate: dec!(1.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "price_decrease_rate",
                ..
            })
        ));

        let config = SimulationConfig {
            initial_balance: dec!(-1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let json = r#"{
            "total_iterations": 250,
            "population": { "random": 60, "trend": 20, "anti_trend": 19, "smart": 1 },
            "seed": 7
        }"#;

        let config = SimulationConfig::from_json(json).unwrap();
        assert_eq!(config.total_iterations, 250);
        assert_eq!(config.population, Population::new(60, 20, 19, 1));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_stock, 100_000);
        assert_eq!(config.price_increase_rate, dec!(0.005));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_negative_count_rejected() {
        let json = r#"{ "population": { "random": -1, "trend": 50, "anti_trend": 50, "smart": 1 } }"#;
        let err = SimulationConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = SimulationConfig::from_file("/nonexistent/cardmarket.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimulationConfig::default().with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
