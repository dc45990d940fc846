//! Scenario analysis: scenario sets, revaluation and risk measures.
//!
//! A [`RiskEngine`] revalues read-only [`Position`]s over a [`ScenarioSet`]
//! and reduces the resulting P&L to [`RiskMeasures`].

mod engine;
mod measures;
mod sets;

pub use engine::{PnlBasis, Position, RiskConfig, RiskEngine, RiskResult};
pub use measures::{tail_index, validate_confidence, RiskMeasures};
pub use sets::{GridConfig, LognormalConfig, ScenarioSet};
