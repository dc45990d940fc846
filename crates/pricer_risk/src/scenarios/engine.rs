//! Scenario revaluation engine.
//!
//! The engine reads positions through shared references and revalues
//! private copies of their contracts, one copy per scenario. Callers'
//! contracts are never touched.

use pricer_core::traits::Valuation;
use pricer_core::types::{Greeks, PricingError};
use pricer_models::instruments::Contract;
use tracing::debug;

use super::measures::{validate_confidence, RiskMeasures};
use super::sets::{GridConfig, LognormalConfig, ScenarioSet};
use crate::parallel::{try_map, ParallelConfig};
use crate::strategy::Strategy;

/// Read-only view of a holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position<'a> {
    /// Contract held.
    pub contract: &'a Contract,
    /// Signed quantity; negative for short holdings.
    pub quantity: i64,
}

impl<'a> Position<'a> {
    /// Creates a position view.
    pub fn new(contract: &'a Contract, quantity: i64) -> Self {
        Self { contract, quantity }
    }
}

/// What a scenario's P&L is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PnlBasis {
    /// Portfolio value in the scenario, Σ quantity·price.
    #[default]
    ScenarioValue,
    /// Scenario value minus the value at current spots.
    ChangeFromBase,
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskConfig {
    /// P&L basis.
    pub pnl_basis: PnlBasis,
    /// Grid used by [`RiskEngine::default_scenarios`] and `LinearGrid` sets.
    pub grid: GridConfig,
    /// Sampler settings for lognormal sets built from this config.
    pub lognormal: LognormalConfig,
    /// Parallel sweep settings.
    pub parallel: ParallelConfig,
}

/// Portfolio Greeks and scenario risk at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskResult {
    /// Σ quantity·delta at current spots.
    pub delta: f64,
    /// Σ quantity·gamma.
    pub gamma: f64,
    /// Σ quantity·vega.
    pub vega: f64,
    /// Σ quantity·theta.
    pub theta: f64,
    /// Σ quantity·rho.
    pub rho: f64,
    /// Empirical Value-at-Risk.
    pub var: f64,
    /// Expected Shortfall.
    pub expected_shortfall: f64,
    /// Largest scenario loss, floored at 0.
    pub max_loss: f64,
    /// Fraction of scenarios with positive P&L.
    pub probability_of_profit: f64,
    /// Number of scenarios evaluated.
    pub scenario_count: usize,
}

impl RiskResult {
    fn new(greeks: Greeks, measures: RiskMeasures, scenario_count: usize) -> Self {
        Self {
            delta: greeks.delta,
            gamma: greeks.gamma,
            vega: greeks.vega,
            theta: greeks.theta,
            rho: greeks.rho,
            var: measures.var,
            expected_shortfall: measures.expected_shortfall,
            max_loss: measures.max_loss,
            probability_of_profit: measures.probability_of_profit,
            scenario_count,
        }
    }

    /// Risk measures part of the result.
    pub fn measures(&self) -> RiskMeasures {
        RiskMeasures {
            var: self.var,
            expected_shortfall: self.expected_shortfall,
            max_loss: self.max_loss,
            probability_of_profit: self.probability_of_profit,
        }
    }
}

/// Scenario risk engine.
///
/// # Examples
/// ```
/// use pricer_risk::scenarios::{Position, RiskEngine, ScenarioSet};
/// use pricer_models::instruments::create_contract;
///
/// let call = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "call", None).unwrap();
/// let engine = RiskEngine::default();
/// let result = engine
///     .evaluate(&[Position::new(&call, 1)], 0.95, &ScenarioSet::default())
///     .unwrap();
///
/// assert_eq!(result.scenario_count, 101);
/// assert_eq!(call.spot(), 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Creates an engine with the given settings.
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Engine settings.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Linear grid from the configured grid settings.
    pub fn default_scenarios(&self) -> ScenarioSet {
        ScenarioSet::LinearGrid(self.config.grid)
    }

    /// Lognormal set from the configured sampler settings.
    pub fn lognormal_scenarios(&self) -> ScenarioSet {
        ScenarioSet::Lognormal(self.config.lognormal)
    }

    /// Portfolio Greeks and scenario risk measures.
    ///
    /// # Errors
    /// - `PricingError::InvalidParameter` for a confidence outside (0, 1],
    ///   an empty or invalid scenario set, or a generated set with no
    ///   positions
    /// - any valuation error raised while revaluing a contract
    pub fn evaluate(
        &self,
        positions: &[Position<'_>],
        confidence: f64,
        scenarios: &ScenarioSet,
    ) -> Result<RiskResult, PricingError> {
        validate_confidence(confidence)?;
        let spots = scenarios.resolve(positions.first().map(|p| p.contract))?;

        let greeks = positions.iter().try_fold(Greeks::default(), |acc, p| {
            Ok::<_, PricingError>(acc + p.contract.greeks()?.scaled(p.quantity as f64))
        })?;

        let base = match self.config.pnl_basis {
            PnlBasis::ScenarioValue => 0.0,
            PnlBasis::ChangeFromBase => portfolio_value(positions)?,
        };

        let parallel = self.config.parallel.should_parallelize(spots.len());
        debug!(
            positions = positions.len(),
            scenarios = spots.len(),
            confidence,
            parallel,
            basis = ?self.config.pnl_basis,
            "evaluating scenario risk"
        );

        let pnl = try_map(&spots, &self.config.parallel, |&spot| {
            Ok::<_, PricingError>(scenario_value(positions, spot)? - base)
        })?;

        let measures = RiskMeasures::from_pnl(&pnl, confidence)?;
        Ok(RiskResult::new(greeks, measures, spots.len()))
    }

    /// Evaluates every leg of `strategy` as a position.
    pub fn evaluate_strategy(
        &self,
        strategy: &Strategy,
        confidence: f64,
        scenarios: &ScenarioSet,
    ) -> Result<RiskResult, PricingError> {
        self.evaluate(&strategy.positions(), confidence, scenarios)
    }
}

/// Σ quantity·price at current spots.
fn portfolio_value(positions: &[Position<'_>]) -> Result<f64, PricingError> {
    positions
        .iter()
        .map(|p| Ok::<_, PricingError>(p.quantity as f64 * p.contract.price()?))
        .sum()
}

/// Σ quantity·price with every contract moved to `spot`.
fn scenario_value(positions: &[Position<'_>], spot: f64) -> Result<f64, PricingError> {
    positions
        .iter()
        .map(|p| Ok::<_, PricingError>(p.quantity as f64 * p.contract.with_spot(spot)?.price()?))
        .sum()
}
