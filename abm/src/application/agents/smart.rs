//! Smart Trader Agent
//!
//! Phased planner that trades for value but must hold zero cards when the
//! run ends.
//!
//! Strategy, by position in the run:
//! 1. **Accumulation** (0-30%): buy when the price is low and cash allows
//! 2. **Active trading** (30-70%): time trades on the expected pressure of
//!    the other agents and on short-term momentum
//! 3. **Gradual reduction** (70-95%): take profits while shrinking the
//!    position, then start forcing random sales
//! 4. **Final liquidation** (last 50 rounds): sell every turn until flat
//!
//! The smart trader knows the population mix and the reaction rule of the
//! trend and anti-trend traders, which is what the pressure estimate uses.

use super::{AgentKind, Fill, Ledger, Strategy, TrendConfig};
use cardmarket_core::{
    Decision, MarketState, Money, Population, Price, Round, Side, SimulationConfig,
};
use rand::Rng;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Part of the run the smart trader is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Accumulation,
    ActiveTrading,
    GradualReduction,
    FinalLiquidation,
}

/// Configuration for the smart trader
///
/// Defaults are the tuned values; the zero-inventory guarantee depends on
/// `liquidation_window` and the forced-sell settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartTraderConfig {
    /// Number of final rounds spent selling unconditionally
    pub liquidation_window: Round,
    /// Run fraction where gradual reduction starts
    pub reduction_start: f64,
    /// Length of the reduction phase, as a run fraction
    pub reduction_span: f64,
    /// Share of holdings the reduction target sheds by the end of the phase
    pub reduction_depth: f64,
    /// Price / average cost needed to take profit while reducing
    pub reduction_profit: Decimal,
    /// Run fraction after which random sales are forced
    pub forced_sell_start: f64,
    /// Chance per round of a forced sale
    pub forced_sell_probability: f64,
    /// Run fraction where active trading starts
    pub trading_start: f64,
    /// Expected net buying above which we sell into strength
    pub sell_pressure: f64,
    /// Expected net buying below which we buy into weakness
    pub buy_pressure: f64,
    /// Price / average cost needed to sell into strength
    pub trading_profit: Decimal,
    /// "Low" = below this fraction of the trailing average (pressure buys)
    pub dip_threshold: Decimal,
    /// "Low" = below this fraction of the trailing average (other buys)
    pub cheap_threshold: Decimal,
    /// Lookback for the momentum signal
    pub momentum_window: usize,
    /// Momentum below which we buy
    pub momentum_trigger: Decimal,
    /// Lookback for the trailing average price
    pub average_window: usize,
    /// Until the trailing average exists, "low" = below initial price times this
    pub opening_premium: Decimal,
    /// Share of balance kept in reserve at the start of the run
    pub reserve_fraction: Decimal,
}

impl Default for SmartTraderConfig {
    fn default() -> Self {
        Self {
            liquidation_window: 50,
            reduction_start: 0.7,
            reduction_span: 0.25,
            reduction_depth: 0.7,
            reduction_profit: dec!(1.03),
            forced_sell_start: 0.85,
            forced_sell_probability: 0.4,
            trading_start: 0.3,
            sell_pressure: 15.0,
            buy_pressure: -10.0,
            trading_profit: dec!(1.08),
            dip_threshold: dec!(0.97),
            cheap_threshold: dec!(0.98),
            momentum_window: 10,
            momentum_trigger: dec!(-0.02),
            average_window: 20,
            opening_premium: dec!(1.025),
            reserve_fraction: dec!(0.2),
        }
    }
}

/// Smart trader agent
#[derive(Debug, Clone)]
pub struct SmartTrader {
    config: SmartTraderConfig,
    /// Reaction rule of the trend / anti-trend population
    peers: TrendConfig,
    population: Population,
    initial_price: Price,
    /// Every price seen on our turns
    price_history: Vec<Price>,
    avg_purchase_price: Price,
}

impl SmartTrader {
    /// Smart trader with default tuning and knowledge of `market`'s population
    pub fn new(market: &SimulationConfig) -> Self {
        Self::with_config(market, SmartTraderConfig::default())
    }

    pub fn with_config(market: &SimulationConfig, config: SmartTraderConfig) -> Self {
        Self {
            config,
            peers: TrendConfig::default(),
            population: market.population,
            initial_price: market.initial_price,
            price_history: Vec::with_capacity(market.total_iterations),
            avg_purchase_price: Decimal::ZERO,
        }
    }

    pub fn config(&self) -> &SmartTraderConfig {
        &self.config
    }

    /// Volume-weighted average cost of the cards held (0 before the first buy)
    pub fn avg_purchase_price(&self) -> Price {
        self.avg_purchase_price
    }

    pub fn price_history(&self) -> &[Price] {
        &self.price_history
    }

    /// Phase for round `iteration` of a `total`-round run
    pub fn phase(&self, iteration: Round, total: Round) -> Phase {
        let it = iteration as f64;
        let total_f = total as f64;

        if iteration >= total.saturating_sub(self.config.liquidation_window) {
            Phase::FinalLiquidation
        } else if it >= total_f * self.config.reduction_start {
            Phase::GradualReduction
        } else if it >= total_f * self.config.trading_start {
            Phase::ActiveTrading
        } else {
            Phase::Accumulation
        }
    }

    /// Expected net buying (+) or selling (-) of the other agents this round.
    ///
    /// Random traders cancel out. Trend and anti-trend traders follow
    /// `peers`, so their expected reaction to the last price move is known.
    pub fn market_pressure(&self, state: &MarketState) -> f64 {
        let random_pressure = 0.0;
        let trend_pressure = self
            .peers
            .expected_pressure(self.peers.is_rally(state), self.population.trend);
        let anti_trend_pressure = self
            .peers
            .expected_pressure(self.peers.is_dip(state), self.population.anti_trend);

        random_pressure + trend_pressure + anti_trend_pressure
    }

    /// Relative price change over the last `momentum_window` observations
    pub fn momentum(&self) -> Decimal {
        let window = self.config.momentum_window;
        if window == 0 || self.price_history.len() < window {
            return Decimal::ZERO;
        }

        let recent = &self.price_history[self.price_history.len() - window..];
        let first = recent[0];
        let last = recent[window - 1];
        if first.is_zero() {
            return Decimal::ZERO;
        }
        (last - first) / first
    }

    /// Is `price` low compared to the trailing average?
    ///
    /// Before a full averaging window has been seen, compares against the
    /// initial price plus `opening_premium` instead, whatever the threshold.
    pub fn is_price_low(&self, price: Price, threshold: Decimal) -> bool {
        let window = self.config.average_window;
        if window == 0 || self.price_history.len() < window {
            return price < self.initial_price * self.config.opening_premium;
        }

        let recent = &self.price_history[self.price_history.len() - window..];
        let avg_recent = recent.iter().sum::<Decimal>() / Decimal::from(window);
        price < avg_recent * threshold
    }

    /// Cash to keep aside; shrinks with the square root of the remaining run
    pub fn cash_reserve(&self, state: &MarketState, balance: Money) -> Money {
        if state.total_iterations == 0 {
            return Decimal::ZERO;
        }
        let remaining_ratio =
            Decimal::from(state.rounds_remaining()) / Decimal::from(state.total_iterations);
        let scale = remaining_ratio.sqrt().unwrap_or(Decimal::ZERO);
        balance * scale * self.config.reserve_fraction
    }

    /// Affordable and leaves more than the reserve after paying
    fn can_afford(&self, state: &MarketState, ledger: &Ledger) -> bool {
        let price = state.price;
        let balance = ledger.balance();
        ledger.can_buy(price) && balance - price > self.cash_reserve(state, balance)
    }

    /// Price is at least `margin` times our average cost
    fn in_profit(&self, price: Price, margin: Decimal) -> bool {
        self.avg_purchase_price > Decimal::ZERO && price >= self.avg_purchase_price * margin
    }

    fn liquidate(&self, ledger: &Ledger) -> Decision {
        if ledger.can_sell() {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    fn reduce<R: Rng + ?Sized>(
        &self,
        state: &MarketState,
        ledger: &Ledger,
        rng: &mut R,
    ) -> Decision {
        if !ledger.can_sell() {
            return Decision::Hold;
        }

        let it = state.iteration as f64;
        let total = state.total_iterations as f64;
        let cards = ledger.cards();

        // Target decays from all current holdings toward (1 - depth) of them
        let progress =
            (it - total * self.config.reduction_start) / (total * self.config.reduction_span);
        let target = (cards as f64 * (1.0 - progress * self.config.reduction_depth)) as u32;

        if cards > target && self.in_profit(state.price, self.config.reduction_profit) {
            return Decision::Sell;
        }

        if it >= total * self.config.forced_sell_start
            && rng.r#gen::<f64>() < self.config.forced_sell_probability
        {
            return Decision::Sell;
        }

        Decision::Hold
    }

    fn trade(&self, state: &MarketState, ledger: &Ledger) -> Decision {
        let price = state.price;
        let pressure = self.market_pressure(state);

        // Others expected to buy: sell into the strength if it pays
        if pressure > self.config.sell_pressure
            && ledger.can_sell()
            && self.in_profit(price, self.config.trading_profit)
        {
            return Decision::Sell;
        }

        // Others expected to sell: pick up cheap cards
        if pressure < self.config.buy_pressure
            && self.is_price_low(price, self.config.dip_threshold)
            && self.can_afford(state, ledger)
        {
            return Decision::Buy;
        }

        if self.momentum() < self.config.momentum_trigger
            && self.is_price_low(price, self.config.cheap_threshold)
            && self.can_afford(state, ledger)
        {
            return Decision::Buy;
        }

        Decision::Hold
    }

    fn accumulate(&self, state: &MarketState, ledger: &Ledger) -> Decision {
        if self.is_price_low(state.price, self.config.cheap_threshold)
            && self.can_afford(state, ledger)
        {
            return Decision::Buy;
        }
        Decision::Hold
    }
}

impl Strategy for SmartTrader {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        state: &MarketState,
        _turn: usize,
        ledger: &Ledger,
        rng: &mut R,
    ) -> Decision {
        self.price_history.push(state.price);

        match self.phase(state.iteration, state.total_iterations) {
            Phase::FinalLiquidation => self.liquidate(ledger),
            Phase::GradualReduction => self.reduce(state, ledger, rng),
            Phase::ActiveTrading => self.trade(state, ledger),
            Phase::Accumulation => self.accumulate(state, ledger),
        }
    }

    fn on_fill(&mut self, fill: &Fill) {
        if fill.side != Side::Buy {
            return;
        }

        self.avg_purchase_price = if fill.cards_before > 0 {
            let held = Decimal::from(fill.cards_before);
            (self.avg_purchase_price * held + fill.price) / (held + Decimal::ONE)
        } else {
            fill.price
        };
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Smart
    }
}
