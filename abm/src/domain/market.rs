//! Market
//!
//! Single-commodity market with a multiplicative price-impact rule:
//! every accepted buy takes one card from stock and pushes the price up by
//! `price_increase_rate`, every sell returns one card and pushes it down by
//! `price_decrease_rate`.

use super::MarketStatistics;
use cardmarket_core::{MarketState, Price, Round, SimulationConfig};
use rust_decimal::Decimal;

/// Market state owned by the simulation
#[derive(Debug, Clone)]
pub struct Market {
    price: Price,
    initial_price: Price,
    previous_price: Price,
    stock: u64,
    increase_factor: Decimal,
    decrease_factor: Decimal,
    /// Price at the end of each round, seeded with the initial price
    price_history: Vec<Price>,
    /// Executed trades per round
    volume_history: Vec<u64>,
}

impl Market {
    /// Create a market at the configured initial price and stock
    pub fn new(config: &SimulationConfig) -> Self {
        let mut price_history = Vec::with_capacity(config.total_iterations + 1);
        price_history.push(config.initial_price);

        Self {
            price: config.initial_price,
            initial_price: config.initial_price,
            previous_price: config.initial_price,
            stock: config.initial_stock,
            increase_factor: Decimal::ONE + config.price_increase_rate,
            decrease_factor: Decimal::ONE - config.price_decrease_rate,
            price_history,
            volume_history: Vec::with_capacity(config.total_iterations),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn initial_price(&self) -> Price {
        self.initial_price
    }

    pub fn previous_price(&self) -> Price {
        self.previous_price
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn price_history(&self) -> &[Price] {
        &self.price_history
    }

    pub fn volume_history(&self) -> &[u64] {
        &self.volume_history
    }

    /// Apply the effect of one purchase.
    ///
    /// Returns false and leaves the market untouched when stock is empty.
    pub fn apply_buy(&mut self) -> bool {
        if self.stock == 0 {
            return false;
        }
        self.stock -= 1;
        self.price *= self.increase_factor;
        true
    }

    /// Apply the effect of one sale. Sales are always accepted.
    pub fn apply_sell(&mut self) -> bool {
        self.stock += 1;
        self.price *= self.decrease_factor;
        true
    }

    /// Record the number of trades executed in the round that is ending
    pub fn record_volume(&mut self, trades: u64) {
        self.volume_history.push(trades);
    }

    /// Close the current round.
    ///
    /// Appends the current price to the history and moves `previous_price`
    /// to the price the round started at.
    pub fn end_iteration(&mut self) {
        self.price_history.push(self.price);
        let len = self.price_history.len();
        self.previous_price = if len > 1 {
            self.price_history[len - 2]
        } else {
            self.initial_price
        };
    }

    /// Snapshot of the market as it is right now
    pub fn state(&self, iteration: Round, total_iterations: Round) -> MarketState {
        MarketState::new(
            self.price,
            self.previous_price,
            self.stock,
            iteration,
            total_iterations,
        )
    }

    /// Summary statistics over the recorded price history
    pub fn statistics(&self) -> MarketStatistics {
        MarketStatistics::from_market(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market_with(initial_price: Decimal, initial_stock: u64) -> Market {
        Market::new(&SimulationConfig {
            initial_price,
            initial_stock,
            ..Default::default()
        })
    }

    #[test]
    fn test_new_market() {
        let market = market_with(dec!(200), 100);

        assert_eq!(market.price(), dec!(200));
        assert_eq!(market.previous_price(), dec!(200));
        assert_eq!(market.stock(), 100);
        assert_eq!(market.price_history(), &[dec!(200)]);
        assert!(market.volume_history().is_empty());
    }

    #[test]
    fn test_apply_buy() {
        let mut market = market_with(dec!(200), 100);

        assert!(market.apply_buy());
        assert_eq!(market.stock(), 99);
        assert_eq!(market.price(), dec!(201));
    }

    #[test]
    fn test_apply_buy_without_stock() {
        let mut market = market_with(dec!(200), 0);

        assert!(!market.apply_buy());
        assert_eq!(market.stock(), 0);
        assert_eq!(market.price(), dec!(200));
    }

    #[test]
    fn test_apply_sell() {
        let mut market = market_with(dec!(200), 0);

        assert!(market.apply_sell());
        assert_eq!(market.stock(), 1);
        assert_eq!(market.price(), dec!(199));
    }

    #[test]
    fn test_buy_then_sell() {
        let mut market = market_with(dec!(200), 100);

        market.apply_buy();
        assert_eq!(market.price(), dec!(201.0));
        market.apply_sell();
        assert_eq!(market.price(), dec!(199.995));
        assert_eq!(market.stock(), 100);
    }

    #[test]
    fn test_end_iteration_tracks_previous_price() {
        let mut market = market_with(dec!(200), 100);

        market.apply_buy();
        market.end_iteration();
        // previous price is the price the round started at
        assert_eq!(market.previous_price(), dec!(200));
        assert_eq!(market.price_history(), &[dec!(200), dec!(201)]);

        market.apply_sell();
        market.end_iteration();
        assert_eq!(market.previous_price(), dec!(201));
        assert_eq!(market.price_history().len(), 3);
    }

    #[test]
    fn test_state_reflects_intra_round_trades() {
        let mut market = market_with(dec!(200), 10);

        let before = market.state(0, 100);
        market.apply_buy();
        let after = market.state(0, 100);

        assert_eq!(before.price, dec!(200));
        assert_eq!(after.price, dec!(201));
        assert_eq!(after.stock, 9);
        assert_eq!(after.previous_price, dec!(200));
        assert_eq!(after.total_iterations, 100);
    }
}
