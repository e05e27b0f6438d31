mod report;

use abm::Simulation;
use anyhow::Context;
use cardmarket_core::SimulationConfig;
use log::info;
use report::{Header, ReportView};

fn print_help() {
    eprintln!(
        r#"Card Market Simulation - agent-based graphics card market

USAGE:
    cardmarket-runner [OPTIONS] [CONFIG]

ARGS:
    <CONFIG>            JSON configuration file (defaults are used when omitted)

OPTIONS:
    --seed <N>          Override the random seed
    --json              Print the report as JSON instead of text
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run with defaults
    cardmarket-runner

    # Reproducible run from a config file
    cardmarket-runner --seed 42 config.json
"#
    );
}

struct Args {
    config_path: Option<String>,
    seed: Option<u64>,
    json: bool,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config_path: None,
        seed: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            "--json" => parsed.json = true,
            "--seed" | "-s" => {
                i += 1;
                let value = args.get(i).context("--seed requires a value")?;
                parsed.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed '{}'", value))?,
                );
            }
            arg if arg.starts_with('-') => {
                anyhow::bail!("unknown option '{}' (see --help)", arg);
            }
            path => parsed.config_path = Some(path.to_string()),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let mut config = match &args.config_path {
        Some(path) => {
            info!("Loading configuration from {}", path);
            SimulationConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from '{}'", path))?
        }
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut simulation = Simulation::new(&config).context("invalid configuration")?;

    if !args.json {
        println!("{}", Header(&config));
    }

    let report = simulation.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", ReportView(&report));
    }

    Ok(())
}
