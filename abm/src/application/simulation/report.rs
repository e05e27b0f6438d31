//! End-of-run report
//!
//! Plain data aggregated from the final market and the agent registry.
//! Rendering is left to the caller.

use crate::application::agents::{Agent, AgentId, AgentKind};
use crate::domain::{Market, MarketStatistics};
use cardmarket_core::{Money, SimulationConfig};
use rust_decimal::Decimal;
use serde::Serialize;

/// One line per agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub kind: AgentKind,
    pub balance: Money,
    pub cards: u32,
    /// Balance plus cards at the final price
    pub total_value: Money,
    pub transactions: usize,
}

/// Aggregates over all agents of one strategy type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindSummary {
    pub kind: AgentKind,
    pub count: usize,
    pub avg_balance: Money,
    pub avg_cards: Decimal,
    pub avg_total_value: Money,
    /// Highest total value in the group
    pub best: Money,
    /// Lowest total value in the group
    pub worst: Money,
}

/// Detail for the smart agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartSummary {
    pub id: AgentId,
    pub balance: Money,
    pub cards: u32,
    pub total_value: Money,
    /// Cash gained over the starting balance
    pub profit: Money,
    /// Total value over the starting balance, in percent
    pub return_pct: Decimal,
    pub transactions: usize,
    /// Ended the run holding no cards
    pub liquidated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub market: MarketStatistics,
    pub initial_balance: Money,
    /// In agent id order
    pub agents: Vec<AgentSummary>,
    /// In population order, empty groups skipped
    pub kinds: Vec<KindSummary>,
    pub smart: Option<SmartSummary>,
}

impl SimulationReport {
    pub fn build(market: &Market, agents: &[Agent], config: &SimulationConfig) -> Self {
        let final_price = market.price();
        let initial_balance = config.initial_balance;

        let agents: Vec<AgentSummary> = agents
            .iter()
            .map(|agent| AgentSummary {
                id: agent.id(),
                kind: agent.kind(),
                balance: agent.balance(),
                cards: agent.cards(),
                total_value: agent.total_value(final_price),
                transactions: agent.transactions().len(),
            })
            .collect();

        let kinds = AgentKind::ALL
            .iter()
            .filter_map(|&kind| summarize_kind(kind, &agents))
            .collect();

        let smart = agents
            .iter()
            .find(|a| a.kind == AgentKind::Smart)
            .map(|a| SmartSummary {
                id: a.id,
                balance: a.balance,
                cards: a.cards,
                total_value: a.total_value,
                profit: a.balance - initial_balance,
                return_pct: percent_change(a.total_value, initial_balance),
                transactions: a.transactions,
                liquidated: a.cards == 0,
            });

        Self {
            market: market.statistics(),
            initial_balance,
            agents,
            kinds,
            smart,
        }
    }

    /// The `n` agents with the highest total value, best first
    pub fn top(&self, n: usize) -> Vec<&AgentSummary> {
        let mut ranked: Vec<&AgentSummary> = self.agents.iter().collect();
        // stable: ties keep id order
        ranked.sort_by(|a, b| b.total_value.cmp(&a.total_value));
        ranked.truncate(n);
        ranked
    }

    pub fn kind(&self, kind: AgentKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|k| k.kind == kind)
    }
}

fn summarize_kind(kind: AgentKind, agents: &[AgentSummary]) -> Option<KindSummary> {
    let group: Vec<&AgentSummary> = agents.iter().filter(|a| a.kind == kind).collect();
    let count = group.len();
    let best = group.iter().map(|a| a.total_value).max()?;
    let worst = group.iter().map(|a| a.total_value).min()?;
    let n = Decimal::from(count);

    Some(KindSummary {
        kind,
        count,
        avg_balance: group.iter().map(|a| a.balance).sum::<Decimal>() / n,
        avg_cards: group.iter().map(|a| Decimal::from(a.cards)).sum::<Decimal>() / n,
        avg_total_value: group.iter().map(|a| a.total_value).sum::<Decimal>() / n,
        best,
        worst,
    })
}

fn percent_change(value: Money, base: Money) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    (value / base - Decimal::ONE) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agents::{RandomTrader, SmartTrader, TrendFollower};
    use rust_decimal_macros::dec;

    fn fixture() -> (Market, Vec<Agent>, SimulationConfig) {
        let config = SimulationConfig::default();
        let market = Market::new(&config);

        let mut rich = Agent::new(AgentId(0), dec!(1000), RandomTrader);
        rich.buy(dec!(100), 0);
        rich.buy(dec!(100), 0);
        let poor = Agent::new(AgentId(1), dec!(500), RandomTrader);
        let trend = Agent::new(AgentId(2), dec!(1000), TrendFollower::default());
        let mut smart = Agent::new(AgentId(3), dec!(1000), SmartTrader::new(&config));
        smart.buy(dec!(180), 0);
        smart.sell(dec!(230), 1);

        (market, vec![rich, poor, trend, smart], config)
    }

    #[test]
    fn test_agent_summaries() {
        let (market, agents, config) = fixture();
        let report = SimulationReport::build(&market, &agents, &config);

        assert_eq!(report.agents.len(), 4);
        // 800 cash + 2 cards at 200
        assert_eq!(report.agents[0].total_value, dec!(1200));
        assert_eq!(report.agents[0].transactions, 2);
        assert_eq!(report.agents[1].total_value, dec!(500));
    }

    #[test]
    fn test_kind_summaries() {
        let (market, agents, config) = fixture();
        let report = SimulationReport::build(&market, &agents, &config);

        // no anti-trend agents: group skipped
        assert_eq!(report.kinds.len(), 3);
        assert!(report.kind(AgentKind::AntiTrend).is_none());

        let random = report.kind(AgentKind::Random).unwrap();
        assert_eq!(random.count, 2);
        assert_eq!(random.avg_balance, dec!(650));
        assert_eq!(random.avg_cards, dec!(1));
        assert_eq!(random.avg_total_value, dec!(850));
        assert_eq!(random.best, dec!(1200));
        assert_eq!(random.worst, dec!(500));
    }

    #[test]
    fn test_smart_summary() {
        let (market, agents, config) = fixture();
        let report = SimulationReport::build(&market, &agents, &config);

        let smart = report.smart.unwrap();
        assert_eq!(smart.id, AgentId(3));
        assert_eq!(smart.balance, dec!(1050));
        assert_eq!(smart.profit, dec!(50));
        assert_eq!(smart.return_pct, dec!(5));
        assert_eq!(smart.transactions, 2);
        assert!(smart.liquidated);
    }

    #[test]
    fn test_top_ranking() {
        let (market, agents, config) = fixture();
        let report = SimulationReport::build(&market, &agents, &config);

        let top: Vec<AgentId> = report.top(3).iter().map(|a| a.id).collect();
        assert_eq!(top, vec![AgentId(0), AgentId(3), AgentId(2)]);

        assert_eq!(report.top(10).len(), 4);
        assert!(report.top(0).is_empty());
    }

    #[test]
    fn test_no_smart_agent() {
        let config = SimulationConfig::default();
        let market = Market::new(&config);
        let agents = vec![Agent::new(AgentId(0), dec!(1000), RandomTrader)];

        let report = SimulationReport::build(&market, &agents, &config);
        assert!(report.smart.is_none());
    }
}
