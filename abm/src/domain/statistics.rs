use super::Market;
use cardmarket_core::Price;
use rust_decimal::Decimal;
use serde::Serialize;

/// End-of-run market summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStatistics {
    pub final_price: Price,
    pub initial_price: Price,
    /// Change from initial to final price, in percent
    pub price_change_pct: Decimal,
    pub final_stock: u64,
    pub max_price: Price,
    pub min_price: Price,
    pub avg_price: Price,
    /// Trades executed over the whole run
    pub total_volume: u64,
    /// Rounds recorded in the price history
    pub rounds: usize,
}

impl MarketStatistics {
    pub(crate) fn from_market(market: &Market) -> Self {
        let history = market.price_history();
        let initial_price = market.initial_price();
        let final_price = market.price();

        // History always holds at least the initial price
        let max_price = history.iter().copied().max().unwrap_or(final_price);
        let min_price = history.iter().copied().min().unwrap_or(final_price);
        let avg_price = if history.is_empty() {
            final_price
        } else {
            history.iter().sum::<Decimal>() / Decimal::from(history.len())
        };

        let price_change_pct = if initial_price.is_zero() {
            Decimal::ZERO
        } else {
            (final_price / initial_price - Decimal::ONE) * Decimal::ONE_HUNDRED
        };

        Self {
            final_price,
            initial_price,
            price_change_pct,
            final_stock: market.stock(),
            max_price,
            min_price,
            avg_price,
            total_volume: market.volume_history().iter().sum(),
            rounds: history.len().saturating_sub(1),
        }
    }
}
