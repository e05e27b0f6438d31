mod market_state;

use rust_decimal::Decimal;

pub use market_state::MarketState;

/// Unit price of a card - uses Decimal so price impact is exact
pub type Price = Decimal;

/// Cash amount held by an agent
pub type Money = Decimal;

/// 0-based round index
pub type Round = usize;
