//! Domain layer: the market and its price-formation rule

mod market;
mod statistics;

pub use market::Market;
pub use statistics::MarketStatistics;
