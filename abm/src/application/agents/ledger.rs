//! Agent Ledger
//!
//! Cash, card inventory and trade log of one agent.

use cardmarket_core::{Money, Price, Round, Transaction};
use rust_decimal::Decimal;

/// Balance and inventory bookkeeping shared by every strategy
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    balance: Money,
    cards: u32,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(initial_balance: Money) -> Self {
        Self {
            balance: initial_balance,
            cards: 0,
            transactions: Vec::new(),
        }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn cards(&self) -> u32 {
        self.cards
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Enough cash to pay `price`
    pub fn can_buy(&self, price: Price) -> bool {
        self.balance >= price
    }

    /// At least one card to sell
    pub fn can_sell(&self) -> bool {
        self.cards > 0
    }

    /// Pay `price` for one card. No-op returning false when cash is short.
    pub fn buy(&mut self, price: Price, round: Round) -> bool {
        if !self.can_buy(price) {
            return false;
        }
        self.balance -= price;
        self.cards += 1;
        self.transactions.push(Transaction::buy(price, round));
        true
    }

    /// Receive `price` for one card. No-op returning false without cards.
    pub fn sell(&mut self, price: Price, round: Round) -> bool {
        if !self.can_sell() {
            return false;
        }
        self.balance += price;
        self.cards -= 1;
        self.transactions.push(Transaction::sell(price, round));
        true
    }

    /// Cash plus cards marked at `current_price`
    pub fn total_value(&self, current_price: Price) -> Money {
        self.balance + Decimal::from(self.cards) * current_price
    }
}
