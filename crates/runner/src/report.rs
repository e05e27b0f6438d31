//! Plain-text rendering of a [`SimulationReport`]

use abm::{AgentKind, SimulationReport};
use cardmarket_core::SimulationConfig;
use rust_decimal::Decimal;
use std::fmt;

const WIDTH: usize = 60;
const TOP_N: usize = 10;

/// Run parameters, printed before the simulation starts
pub struct Header<'a>(pub &'a SimulationConfig);

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        let population = &config.population;

        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "GRAPHICS CARD MARKET SIMULATION")?;
        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "Initial price: ${:.2}", config.initial_price)?;
        writeln!(f, "Initial stock: {} units", config.initial_stock)?;
        writeln!(f, "Total agents: {}", population.total())?;
        writeln!(f, "  - {}: {}", AgentKind::Random, population.random)?;
        writeln!(f, "  - {}: {}", AgentKind::Trend, population.trend)?;
        writeln!(f, "  - {}: {}", AgentKind::AntiTrend, population.anti_trend)?;
        writeln!(f, "  - {}: {}", AgentKind::Smart, population.smart)?;
        writeln!(f, "Iterations: {}", config.total_iterations)?;
        if let Some(seed) = config.seed {
            writeln!(f, "Seed: {}", seed)?;
        }
        write!(f, "{}", "=".repeat(WIDTH))
    }
}

/// Final results
pub struct ReportView<'a>(pub &'a SimulationReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let market = &report.market;

        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "FINAL RESULTS")?;
        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f)?;
        writeln!(f, "Final price: ${:.2}", market.final_price)?;
        writeln!(f, "Price change: {}%", signed(market.price_change_pct))?;
        writeln!(f, "Final stock: {} units", market.final_stock)?;
        writeln!(f, "Highest price: ${:.2}", market.max_price)?;
        writeln!(f, "Lowest price: ${:.2}", market.min_price)?;
        writeln!(f, "Average price: ${:.2}", market.avg_price)?;
        writeln!(f, "Trades: {}", market.total_volume)?;

        section(f, "SUMMARY BY AGENT TYPE")?;
        for kind in &report.kinds {
            writeln!(f)?;
            writeln!(f, "{} ({} agents):", kind.kind, kind.count)?;
            writeln!(f, "  Average balance: ${:.2}", kind.avg_balance)?;
            writeln!(f, "  Average cards: {:.1}", kind.avg_cards)?;
            writeln!(f, "  Average total value: ${:.2}", kind.avg_total_value)?;
            writeln!(f, "  Best agent: ${:.2}", kind.best)?;
            writeln!(f, "  Worst agent: ${:.2}", kind.worst)?;
        }

        if let Some(smart) = &report.smart {
            section(f, "SMART AGENT DETAIL")?;
            writeln!(f, "Final balance: ${:.2}", smart.balance)?;
            writeln!(f, "Cards left: {}", smart.cards)?;
            writeln!(f, "Total value: ${:.2}", smart.total_value)?;
            writeln!(f, "Profit/Loss: ${}", signed(smart.profit))?;
            writeln!(f, "Return: {}%", signed(smart.return_pct))?;
            writeln!(f, "Transactions: {}", smart.transactions)?;
            writeln!(f)?;
            if smart.liquidated {
                writeln!(f, "Finished with 0 cards (requirement met)")?;
            } else {
                writeln!(f, "Did not sell all cards: {} left", smart.cards)?;
            }
        }

        section(f, &format!("TOP {} AGENTS BY TOTAL VALUE", TOP_N))?;
        for (rank, agent) in report.top(TOP_N).iter().enumerate() {
            let marker = if agent.kind == AgentKind::Smart { "*" } else { " " };
            writeln!(
                f,
                "{} {:2}. {:<16} (ID:{:2}): ${:.2} (balance: ${:.2}, cards: {})",
                marker,
                rank + 1,
                agent.kind.name(),
                agent.id.0,
                agent.total_value,
                agent.balance,
                agent.cards
            )?;
        }

        write!(f, "{}", "=".repeat(WIDTH))
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", "-".repeat(WIDTH))?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(WIDTH))
}

/// Two decimals with an explicit sign
fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        format!("{:.2}", value)
    } else {
        format!("+{:.2}", value)
    }
}
