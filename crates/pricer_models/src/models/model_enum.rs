//! Static dispatch enum over the valuation models.
//!
//! `ValuationModel` is the closed set {European, American(steps)}. Every
//! operation is a `match` that forwards to the closed form or the lattice;
//! adding a model means adding a variant and one arm per operation.
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::OptionSide;
//! use pricer_models::instruments::OptionParams;
//! use pricer_models::models::ValuationModel;
//!
//! let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Put).unwrap();
//! let european = ValuationModel::European.price(&params).unwrap();
//! let american = ValuationModel::american(100).unwrap().price(&params).unwrap();
//!
//! assert_eq!(ValuationModel::European.model_name(), "european");
//! assert!(american > european);
//! ```

use std::fmt;

use pricer_core::types::{Greeks, PricingError};

use crate::analytical::BlackScholes;
use crate::instruments::OptionParams;
use crate::lattice::{AmericanBinomial, DEFAULT_STEPS};

/// Valuation model bound to a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum ValuationModel {
    /// Closed-form Black-Scholes, European exercise.
    #[default]
    European,
    /// CRR binomial lattice, American exercise.
    American {
        /// Number of lattice steps (>= 1).
        steps: usize,
    },
}

impl ValuationModel {
    /// American model with `steps` lattice layers.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `steps == 0`.
    pub fn american(steps: usize) -> Result<Self, PricingError> {
        AmericanBinomial::new(steps).map(|m| ValuationModel::American { steps: m.steps() })
    }

    /// American model with the default step count.
    pub fn american_default() -> Self {
        ValuationModel::American {
            steps: DEFAULT_STEPS,
        }
    }

    /// Short model name.
    pub fn model_name(&self) -> &'static str {
        match self {
            ValuationModel::European => "european",
            ValuationModel::American { .. } => "american",
        }
    }

    /// Lattice steps, `None` for the closed form.
    pub fn steps(&self) -> Option<usize> {
        match self {
            ValuationModel::European => None,
            ValuationModel::American { steps } => Some(*steps),
        }
    }

    fn closed_form(params: &OptionParams) -> Result<BlackScholes, PricingError> {
        BlackScholes::new(params.spot(), params.rate(), params.volatility())
    }

    fn lattice(steps: usize) -> Result<AmericanBinomial, PricingError> {
        AmericanBinomial::new(steps)
    }

    /// Present value.
    pub fn price(&self, params: &OptionParams) -> Result<f64, PricingError> {
        match self {
            ValuationModel::European => {
                Self::closed_form(params)?.price(params.strike(), params.expiry(), params.side())
            }
            ValuationModel::American { steps } => Self::lattice(*steps)?.price(params),
        }
    }

    /// ∂V/∂S.
    pub fn delta(&self, params: &OptionParams) -> Result<f64, PricingError> {
        match self {
            ValuationModel::European => {
                Self::closed_form(params)?.delta(params.strike(), params.expiry(), params.side())
            }
            ValuationModel::American { steps } => Self::lattice(*steps)?.delta(params),
        }
    }

    /// ∂²V/∂S².
    pub fn gamma(&self, params: &OptionParams) -> Result<f64, PricingError> {
        match self {
            ValuationModel::European => {
                Self::closed_form(params)?.gamma(params.strike(), params.expiry())
            }
            ValuationModel::American { steps } => Self::lattice(*steps)?.gamma(params),
        }
    }

    /// ∂V/∂σ per unit of volatility.
    pub fn vega(&self, params: &OptionParams) -> Result<f64, PricingError> {
        match self {
            ValuationModel::European => {
                Self::closed_form(params)?.vega(params.strike(), params.expiry())
            }
            ValuationModel::American { steps } => Self::lattice(*steps)?.vega(params),
        }
    }

    /// ∂V/∂t per year.
    pub fn theta(&self, params: &OptionParams) -> Result<f64, PricingError> {
        match self {
            ValuationModel::European => {
                Self::closed_form(params)?.theta(params.strike(), params.expiry(), params.side())
            }
            ValuationModel::American { steps } => Self::lattice(*steps)?.theta(params),
        }
    }

    /// ∂V/∂r per unit of rate.
    pub fn rho(&self, params: &OptionParams) -> Result<f64, PricingError> {
        match self {
            ValuationModel::European => {
                Self::closed_form(params)?.rho(params.strike(), params.expiry(), params.side())
            }
            ValuationModel::American { steps } => Self::lattice(*steps)?.rho(params),
        }
    }

    /// All five Greeks.
    pub fn greeks(&self, params: &OptionParams) -> Result<Greeks, PricingError> {
        Ok(Greeks {
            delta: self.delta(params)?,
            gamma: self.gamma(params)?,
            vega: self.vega(params)?,
            theta: self.theta(params)?,
            rho: self.rho(params)?,
        })
    }
}

impl fmt::Display for ValuationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuationModel::European => write!(f, "european"),
            ValuationModel::American { steps } => write!(f, "american({} steps)", steps),
        }
    }
}
