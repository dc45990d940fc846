//! optpricer - option pricing, strategies and scenario risk from the shell
//!
//! # Commands
//!
//! - `optpricer price` - price one contract with its Greeks
//! - `optpricer strategy` - build a named strategy and analyse its payoff
//! - `optpricer strategies` - list strategies, models and Greeks
//! - `optpricer risk` - scenario VaR/ES for a strategy
//! - `optpricer surface` - Greek surface over spot and volatility
//! - `optpricer implied-vol` - invert Black-Scholes for volatility
//!
//! Every command prints JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands::{self, implied_vol, price, risk, strategy, surface};
use service_cli::config::{build_config, CliArgs};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Option pricing and risk CLI
#[derive(Parser, Debug)]
#[command(name = "optpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Lattice steps for American contracts
    #[arg(long, global = true)]
    steps: Option<usize>,

    /// VaR/ES confidence level in (0, 1]
    #[arg(long, global = true)]
    confidence: Option<f64>,

    /// Scenario count from which sweeps run in parallel
    #[arg(long, global = true)]
    parallel_threshold: Option<usize>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price one contract and report its Greeks
    Price(price::PriceArgs),

    /// Build a named strategy and analyse its expiry payoff
    Strategy(strategy::StrategyArgs),

    /// List available strategies, models and Greeks
    Strategies,

    /// Scenario risk for a named strategy
    Risk(risk::RiskArgs),

    /// Greek surface over spot and volatility
    Surface(surface::SurfaceArgs),

    /// Implied volatility from a market price
    ImpliedVol(implied_vol::ImpliedVolArgs),
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            steps: cli.steps,
            confidence: cli.confidence,
            parallel_threshold: cli.parallel_threshold,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level.as_filter_str());
    debug!(
        log_level = %config.log_level,
        default_steps = config.default_steps,
        confidence = config.confidence,
        "configuration loaded"
    );

    let output = match &cli.command {
        Commands::Price(args) => commands::to_json(&price::run(args, &config)?, cli.compact)?,
        Commands::Strategy(args) => commands::to_json(&strategy::run(args, &config)?, cli.compact)?,
        Commands::Strategies => commands::to_json(&strategy::catalogue(), cli.compact)?,
        Commands::Risk(args) => commands::to_json(&risk::run(args, &config)?, cli.compact)?,
        Commands::Surface(args) => commands::to_json(&surface::run(args)?, cli.compact)?,
        Commands::ImpliedVol(args) => commands::to_json(&implied_vol::run(args)?, cli.compact)?,
    };

    println!("{}", output);
    Ok(())
}
