//! End-to-end simulation tests
//!
//! Full runs with the default population, checked against the market and
//! ledger invariants and the smart trader's zero-inventory guarantee.

use abm::{AgentKind, Market, Simulation};
use cardmarket_core::{ConfigError, SimulationConfig};
use rust_decimal_macros::dec;

const SEED: u64 = 42;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config(total_iterations: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        total_iterations,
        progress_interval: 25,
        ..Default::default()
    }
    .with_seed(seed)
}

#[test]
fn test_market_price_impact_end_to_end() {
    let config = SimulationConfig::default();
    let mut market = Market::new(&config);

    assert!(market.apply_buy());
    assert_eq!(market.price(), dec!(201));
    assert_eq!(market.stock(), 99_999);

    assert!(market.apply_sell());
    assert_eq!(market.price(), dec!(199.995));
    assert_eq!(market.stock(), 100_000);
}

#[test]
fn test_invariants_hold_every_round() {
    init_logger();
    let config = config(200, SEED);
    let mut sim = Simulation::new(&config).unwrap();

    while let Some(round) = sim.step() {
        assert!(round.price > dec!(0), "round {}: price {}", round.iteration, round.price);

        let held: u64 = sim.agents().iter().map(|a| u64::from(a.cards())).sum();
        assert_eq!(round.stock + held, config.initial_stock);

        for agent in sim.agents() {
            assert!(agent.balance() >= dec!(0), "{} went negative", agent);
        }
    }
}

#[test]
fn test_smart_agent_liquidates_in_short_run() {
    init_logger();

    for seed in [SEED, 7, 2024] {
        let mut sim = Simulation::new(&config(100, seed)).unwrap();
        let report = sim.run();

        let smart = report.smart.expect("default population has a smart agent");
        assert_eq!(smart.cards, 0, "seed {}: smart agent still holds cards", seed);
        assert!(smart.liquidated);
        assert!(smart.balance >= dec!(0));
    }
}

#[test]
fn test_smart_agent_liquidates_in_full_length_run() {
    init_logger();

    // default length: reduction and forced sales run before the final window
    for seed in 0..4 {
        let mut config = config(1000, seed);
        config.progress_interval = 250;
        let mut sim = Simulation::new(&config).unwrap();
        let report = sim.run();

        let smart = report.smart.expect("default population has a smart agent");
        assert_eq!(smart.cards, 0, "seed {}: smart agent still holds cards", seed);
        assert!(smart.balance >= dec!(0));
        assert!(report.market.final_price > dec!(0));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut sim1 = Simulation::new(&config(150, SEED)).unwrap();
    let mut sim2 = Simulation::new(&config(150, SEED)).unwrap();

    let report1 = sim1.run();
    let report2 = sim2.run();

    assert_eq!(sim1.market().price_history(), sim2.market().price_history());
    assert_eq!(sim1.market().volume_history(), sim2.market().volume_history());
    assert_eq!(report1, report2);
}

#[test]
fn test_different_seeds_diverge() {
    let mut sim1 = Simulation::new(&config(50, 1)).unwrap();
    let mut sim2 = Simulation::new(&config(50, 2)).unwrap();

    sim1.run();
    sim2.run();

    assert_ne!(sim1.market().price_history(), sim2.market().price_history());
}

#[test]
fn test_report_consistent_with_registry() {
    let mut sim = Simulation::new(&config(100, SEED)).unwrap();
    let report = sim.run();

    assert_eq!(report.agents.len(), 100);
    assert_eq!(report.market.rounds, 100);
    assert_eq!(report.market.final_price, sim.market().price());
    assert_eq!(
        report.market.total_volume,
        report.agents.iter().map(|a| a.transactions as u64).sum::<u64>()
    );

    let counts: Vec<(AgentKind, usize)> = report.kinds.iter().map(|k| (k.kind, k.count)).collect();
    assert_eq!(
        counts,
        vec![
            (AgentKind::Random, 51),
            (AgentKind::Trend, 24),
            (AgentKind::AntiTrend, 24),
            (AgentKind::Smart, 1),
        ]
    );

    let top = report.top(10);
    assert_eq!(top.len(), 10);
    for pair in top.windows(2) {
        assert!(pair[0].total_value >= pair[1].total_value);
    }
    for kind in &report.kinds {
        assert!(kind.best >= kind.worst);
    }
}

#[test]
fn test_report_serializes_to_json() {
    let mut sim = Simulation::new(&config(100, SEED)).unwrap();
    let report = sim.run();

    let json = serde_json::to_string(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["agents"].as_array().map(Vec::len), Some(100));
    assert_eq!(value["kinds"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["agents"][99]["kind"], "Smart");
    assert_eq!(value["smart"]["liquidated"], true);
    assert_eq!(value["market"]["rounds"], 100);
}

#[test]
fn test_config_from_json_runs() {
    let json = r#"{
        "total_iterations": 60,
        "initial_price": 150.0,
        "seed": 9
    }"#;
    let config = SimulationConfig::from_json(json).unwrap();
    let mut sim = Simulation::new(&config).unwrap();
    let report = sim.run();

    assert_eq!(report.market.initial_price, dec!(150));
    assert_eq!(sim.market().price_history().len(), 61);
}

#[test]
fn test_negative_population_rejected() {
    let json = r#"{ "population": { "random": -1, "trend": 24, "anti_trend": 24, "smart": 1 } }"#;
    assert!(matches!(
        SimulationConfig::from_json(json),
        Err(ConfigError::Parse(_))
    ));
}
