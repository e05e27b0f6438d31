//! Trend Follower Agent
//!
//! Bets on trend continuation.
//! Role: Amplifies rallies, creates feedback loops.
//!
//! Strategy:
//! - Price rose by `threshold` or more since last round: buy with `buy_probability`
//! - Otherwise: sell with `sell_probability`, hold the rest of the time

use super::{AgentKind, Ledger, Strategy};
use cardmarket_core::{Decision, MarketState};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Reaction rule shared by the trend and anti-trend traders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Round-over-round price change that counts as a move (0.01 = 1%)
    pub threshold: Decimal,
    /// Probability of buying once a move is detected
    pub buy_probability: f64,
    /// Probability of selling when no move is detected
    pub sell_probability: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            threshold: dec!(0.01),
            buy_probability: 0.75,
            sell_probability: 0.20,
        }
    }
}

impl TrendConfig {
    /// Price rose by at least `threshold` since last round
    pub fn is_rally(&self, state: &MarketState) -> bool {
        state.price_change_percentage() >= self.threshold
    }

    /// Price fell by at least `threshold` since last round
    pub fn is_dip(&self, state: &MarketState) -> bool {
        state.price_change_percentage() <= -self.threshold
    }

    /// Buy with `buy_probability` when `triggered`, otherwise sell with
    /// `sell_probability`. One draw either way.
    pub(crate) fn react<R: Rng + ?Sized>(&self, triggered: bool, rng: &mut R) -> Decision {
        let draw = rng.r#gen::<f64>();
        if triggered {
            if draw < self.buy_probability {
                Decision::Buy
            } else {
                Decision::Hold
            }
        } else if draw < self.sell_probability {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    /// Expected net buying of `count` agents following this rule
    pub(crate) fn expected_pressure(&self, triggered: bool, count: usize) -> f64 {
        if triggered {
            count as f64 * self.buy_probability
        } else {
            count as f64 * -self.sell_probability
        }
    }
}

/// Stateless trend follower
#[derive(Debug, Clone, Default)]
pub struct TrendFollower {
    config: TrendConfig,
}

impl TrendFollower {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }
}

impl Strategy for TrendFollower {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        state: &MarketState,
        _turn: usize,
        _ledger: &Ledger,
        rng: &mut R,
    ) -> Decision {
        self.config.react(self.config.is_rally(state), rng)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Trend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn state_with_change(price: Decimal, previous_price: Decimal) -> MarketState {
        MarketState::new(price, previous_price, 1000, 10, 100)
    }

    #[test]
    fn test_never_sells_on_rally() {
        let mut trader = TrendFollower::default();
        let mut rng = StdRng::seed_from_u64(7);
        let ledger = Ledger::new(dec!(1000));
        // exactly +1%
        let state = state_with_change(dec!(202), dec!(200));

        for turn in 0..200 {
            let decision = trader.decide(&state, turn, &ledger, &mut rng);
            assert_ne!(decision, Decision::Sell);
        }
    }

    #[test]
    fn test_never_buys_without_rally() {
        let mut trader = TrendFollower::default();
        let mut rng = StdRng::seed_from_u64(7);
        let ledger = Ledger::new(dec!(1000));
        let state = state_with_change(dec!(201.9), dec!(200));

        let mut sells = 0;
        for turn in 0..500 {
            let decision = trader.decide(&state, turn, &ledger, &mut rng);
            assert_ne!(decision, Decision::Buy);
            if decision == Decision::Sell {
                sells += 1;
            }
        }

        // ~20% of 500
        assert!((60..=140).contains(&sells), "sells = {}", sells);
    }

    #[test]
    fn test_expected_pressure() {
        let config = TrendConfig::default();
        assert_relative_eq!(config.expected_pressure(true, 24), 18.0);
        assert_relative_eq!(config.expected_pressure(false, 24), -4.8);
        assert_eq!(config.expected_pressure(true, 0), 0.0);
    }
}
