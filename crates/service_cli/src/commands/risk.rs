//! Risk command implementation
//!
//! Builds a strategy and runs it through the scenario risk engine.

use clap::{Args, ValueEnum};
use pricer_risk::scenarios::{PnlBasis, RiskEngine, RiskResult, ScenarioSet};
use pricer_risk::strategy::StrategyKind;
use serde::Serialize;
use tracing::info;

use super::strategy::StrategyRequest;
use crate::config::CliConfig;
use crate::Result;

/// Generated scenario families
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Linear spot grid from the configured bounds
    Grid,
    /// Seeded lognormal draws over the configured horizon
    Lognormal,
    /// Spots passed with --spots
    Explicit,
}

/// Arguments of `optpricer risk`
#[derive(Debug, Clone, Args)]
pub struct RiskArgs {
    #[command(flatten)]
    pub request: StrategyRequest,

    /// Scenario family; ignored when --spots is given
    #[arg(long, value_enum, default_value_t = ScenarioKind::Grid)]
    pub scenarios: ScenarioKind,

    /// Explicit scenario spots, comma separated
    #[arg(long, value_delimiter = ',')]
    pub spots: Vec<f64>,

    /// Measure P&L as the change from the current portfolio value
    #[arg(long)]
    pub change_from_base: bool,
}

/// Output of `optpricer risk`
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub strategy: StrategyKind,
    pub scenarios: ScenarioKind,
    pub pnl_basis: PnlBasis,
    pub confidence: f64,
    #[serde(flatten)]
    pub result: RiskResult,
}

/// Run the risk command
pub fn run(args: &RiskArgs, config: &CliConfig) -> Result<RiskReport> {
    let strategy = args.request.build(config)?;

    let mut risk_config = config.risk.clone();
    if args.change_from_base {
        risk_config.pnl_basis = PnlBasis::ChangeFromBase;
    }
    let engine = RiskEngine::new(risk_config);

    let (kind, scenarios) = if !args.spots.is_empty() {
        (ScenarioKind::Explicit, ScenarioSet::explicit(args.spots.clone()))
    } else {
        match args.scenarios {
            ScenarioKind::Grid => (ScenarioKind::Grid, engine.default_scenarios()),
            ScenarioKind::Lognormal => (ScenarioKind::Lognormal, engine.lognormal_scenarios()),
            // no spots given: the engine rejects the empty set
            ScenarioKind::Explicit => (ScenarioKind::Explicit, ScenarioSet::explicit(Vec::new())),
        }
    };

    let result = engine.evaluate_strategy(&strategy, config.confidence, &scenarios)?;
    info!(
        strategy = %strategy.kind(),
        scenarios = result.scenario_count,
        var = result.var,
        "risk evaluated"
    );

    Ok(RiskReport {
        strategy: strategy.kind(),
        scenarios: kind,
        pnl_basis: engine.config().pnl_basis,
        confidence: config.confidence,
        result,
    })
}
