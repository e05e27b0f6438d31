//! Simulation Runner
//!
//! The round loop that coordinates the agents and the market.

use super::SimulationReport;
use crate::application::agents::{
    Agent, AgentId, AgentKind, AntiTrendTrader, RandomTrader, SmartTrader, TrendFollower,
};
use crate::domain::Market;
use cardmarket_core::{ConfigResult, Price, Round, Side, SimulationConfig};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Result of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    /// Round number (0-based)
    pub iteration: Round,
    /// Buys executed this round
    pub buys: u64,
    /// Sells executed this round
    pub sells: u64,
    /// Price at the end of the round
    pub price: Price,
    /// Stock at the end of the round
    pub stock: u64,
}

impl RoundResult {
    pub fn volume(&self) -> u64 {
        self.buys + self.sells
    }
}

/// The simulation owns the market and the agent registry
///
/// All randomness (acting order and every stochastic strategy) comes from
/// the one `rng`, so a seeded run is reproducible.
pub struct Simulation<R: Rng = StdRng> {
    config: SimulationConfig,
    market: Market,
    agents: Vec<Agent>,
    /// Acting order, reshuffled every round
    order: Vec<usize>,
    iteration: Round,
    rng: R,
}

impl Simulation<StdRng> {
    /// Validate `config` and set up a run, seeded from `config.seed` when present
    pub fn new(config: &SimulationConfig) -> ConfigResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    /// Validate `config` and set up a run drawing from `rng`
    pub fn with_rng(config: &SimulationConfig, rng: R) -> ConfigResult<Self> {
        config.validate()?;

        let market = Market::new(config);
        let agents = Self::populate(config);
        let order = (0..agents.len()).collect();

        Ok(Self {
            config: config.clone(),
            market,
            agents,
            order,
            iteration: 0,
            rng,
        })
    }

    /// Agents in population order: random, trend, anti-trend, smart
    fn populate(config: &SimulationConfig) -> Vec<Agent> {
        let population = &config.population;
        let balance = config.initial_balance;
        let mut agents = Vec::with_capacity(population.total());

        for _ in 0..population.random {
            agents.push(Agent::new(AgentId(agents.len()), balance, RandomTrader));
        }
        for _ in 0..population.trend {
            agents.push(Agent::new(
                AgentId(agents.len()),
                balance,
                TrendFollower::default(),
            ));
        }
        for _ in 0..population.anti_trend {
            agents.push(Agent::new(
                AgentId(agents.len()),
                balance,
                AntiTrendTrader::default(),
            ));
        }
        for _ in 0..population.smart {
            agents.push(Agent::new(
                AgentId(agents.len()),
                balance,
                SmartTrader::new(config),
            ));
        }

        agents
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    /// First agent of `kind`, if any
    pub fn first_of(&self, kind: AgentKind) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.kind() == kind)
    }

    /// Rounds completed so far
    pub fn iteration(&self) -> Round {
        self.iteration
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.config.total_iterations
    }

    /// Run the remaining rounds and build the report
    pub fn run(&mut self) -> SimulationReport {
        info!(
            "Starting simulation: {} agents, {} rounds, price {}, stock {}",
            self.agents.len(),
            self.config.total_iterations,
            self.market.price(),
            self.market.stock()
        );

        while self.step().is_some() {}

        let report = self.report();
        info!(
            "Simulation finished: final price {:.2} ({:.2}%), {} trades",
            report.market.final_price,
            report.market.price_change_pct,
            report.market.total_volume
        );

        for agent in self.agents.iter().filter(|a| a.kind() == AgentKind::Smart) {
            if agent.cards() > 0 {
                warn!(
                    "{} still holds {} cards at the end of the run",
                    agent,
                    agent.cards()
                );
            }
        }

        report
    }

    /// Process one round. Returns `None` once the run is complete.
    pub fn step(&mut self) -> Option<RoundResult> {
        if self.is_finished() {
            return None;
        }

        let iteration = self.iteration;
        let total = self.config.total_iterations;
        self.order.shuffle(&mut self.rng);

        let mut buys = 0u64;
        let mut sells = 0u64;

        for turn in 0..self.order.len() {
            let idx = self.order[turn];
            // Fresh snapshot: later agents see earlier agents' price impact
            let state = self.market.state(iteration, total);
            let agent = &mut self.agents[idx];

            let Some(side) = agent.decide(&state, turn, &mut self.rng).side() else {
                continue;
            };

            let filled = match side {
                Side::Buy => self.market.has_stock() && agent.buy(state.price, iteration),
                Side::Sell => agent.sell(state.price, iteration),
            };
            if !filled {
                continue;
            }

            match side {
                Side::Buy => {
                    self.market.apply_buy();
                    buys += 1;
                }
                Side::Sell => {
                    self.market.apply_sell();
                    sells += 1;
                }
            }
            trace!("round {}: {} {} at {}", iteration, agent.id(), side, state.price);
        }

        self.market.record_volume(buys + sells);
        self.market.end_iteration();
        self.iteration += 1;

        let result = RoundResult {
            iteration,
            buys,
            sells,
            price: self.market.price(),
            stock: self.market.stock(),
        };

        debug!(
            "round {}: buys={}, sells={}, price={}, stock={}",
            iteration, buys, sells, result.price, result.stock
        );

        let interval = self.config.progress_interval;
        if interval > 0 && self.iteration % interval == 0 {
            info!(
                "Iteration {}/{} - price: {:.2}, stock: {}",
                self.iteration, total, result.price, result.stock
            );
        }

        Some(result)
    }

    /// Report on the run as it stands
    pub fn report(&self) -> SimulationReport {
        SimulationReport::build(&self.market, &self.agents, &self.config)
    }
}
