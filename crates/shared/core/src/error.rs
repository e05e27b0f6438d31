//! Configuration errors
//!
//! Raised before any market or agent exists. Trade precondition failures
//! (not enough cash, no cards, no stock) are not errors and never show up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Agent population must total {expected}, got {actual}")]
    PopulationTotal { expected: usize, actual: usize },

    #[error("Number of iterations must be positive")]
    NonPositiveIterations,

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
