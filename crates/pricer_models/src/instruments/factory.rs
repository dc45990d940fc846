//! Name-based contract construction.
//!
//! The factory is a lookup table from model name to a model builder. Names
//! are matched case-insensitively after trimming.

use pricer_core::types::{OptionSide, PricingError};
use tracing::debug;

use super::{Contract, OptionParams};
use crate::lattice::DEFAULT_STEPS;
use crate::models::ValuationModel;

type ModelBuilder = fn(Option<usize>) -> Result<ValuationModel, PricingError>;

fn european(_steps: Option<usize>) -> Result<ValuationModel, PricingError> {
    Ok(ValuationModel::European)
}

fn american(steps: Option<usize>) -> Result<ValuationModel, PricingError> {
    ValuationModel::american(steps.unwrap_or(DEFAULT_STEPS))
}

/// Registered model names and their builders.
const MODELS: &[(&str, ModelBuilder)] = &[
    ("european", european),
    ("european_option", european),
    ("american", american),
    ("american_option", american),
];

/// Builds contracts from a model name.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionSide, PricingError};
/// use pricer_models::instruments::{ModelFactory, OptionParams};
///
/// let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Put).unwrap();
/// let contract = ModelFactory::create("american", params, Some(200)).unwrap();
/// assert_eq!(contract.model_kind(), "american");
///
/// let err = ModelFactory::create("bermudan", params, None).unwrap_err();
/// assert!(matches!(err, PricingError::UnknownModel(_)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelFactory;

impl ModelFactory {
    /// Resolves a model name. `steps` only applies to lattice models and
    /// defaults to 100 there.
    ///
    /// # Errors
    /// - `PricingError::UnknownModel` for unregistered names
    /// - `PricingError::InvalidParameter` for `Some(0)` steps on a lattice model
    pub fn model(name: &str, steps: Option<usize>) -> Result<ValuationModel, PricingError> {
        let key = name.trim().to_lowercase();
        let builder = MODELS
            .iter()
            .find(|(registered, _)| *registered == key)
            .map(|(_, builder)| *builder)
            .ok_or_else(|| PricingError::UnknownModel(name.to_string()))?;
        builder(steps)
    }

    /// Binds validated parameters to the named model.
    pub fn create(
        name: &str,
        params: OptionParams,
        steps: Option<usize>,
    ) -> Result<Contract, PricingError> {
        let model = Self::model(name, steps)?;
        let contract = Contract::new(params, model)?;
        debug!(
            model = %model,
            side = %params.side(),
            spot = params.spot(),
            strike = params.strike(),
            expiry = params.expiry(),
            "contract created"
        );
        Ok(contract)
    }

    /// Registered model names, aliases included.
    pub fn available_models() -> Vec<&'static str> {
        MODELS.iter().map(|(name, _)| *name).collect()
    }
}

/// Validates raw inputs and builds a contract.
///
/// The model name is resolved first, then the side, then the numeric
/// parameters.
///
/// # Errors
/// - `PricingError::UnknownModel` for unregistered model names
/// - `PricingError::InvalidParameter` for an unknown side, non-positive
///   spot, strike or volatility, negative expiry, or zero lattice steps
///
/// # Examples
/// ```
/// use pricer_core::traits::Valuation;
/// use pricer_models::instruments::create_contract;
///
/// let call = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "call", None).unwrap();
/// assert!((call.price().unwrap() - 10.45).abs() < 0.05);
///
/// assert!(create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "straddle", None).is_err());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn create_contract(
    model: &str,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    side: &str,
    steps: Option<usize>,
) -> Result<Contract, PricingError> {
    let valuation_model = ModelFactory::model(model, steps)?;
    let side: OptionSide = side.parse()?;
    let params = OptionParams::new(spot, strike, rate, volatility, expiry, side)?;
    let contract = Contract::new(params, valuation_model)?;
    debug!(model = %valuation_model, side = %side, spot, strike, expiry, "contract created");
    Ok(contract)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_names_and_aliases() {
        assert_eq!(ModelFactory::model("european", None).unwrap(), ValuationModel::European);
        assert_eq!(ModelFactory::model("european_option", None).unwrap(), ValuationModel::European);
        assert_eq!(
            ModelFactory::model("American", None).unwrap(),
            ValuationModel::American { steps: 100 }
        );
        assert_eq!(
            ModelFactory::model(" american_option ", Some(250)).unwrap(),
            ValuationModel::American { steps: 250 }
        );
        assert_eq!(ModelFactory::available_models().len(), 4);
    }

    #[test]
    fn test_steps_ignored_by_closed_form() {
        assert_eq!(ModelFactory::model("european", Some(0)).unwrap(), ValuationModel::European);
    }

    #[test]
    fn test_unknown_model() {
        match ModelFactory::model("asian", None) {
            Err(PricingError::UnknownModel(name)) => assert_eq!(name, "asian"),
            other => panic!("Expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn test_create_contract_validation() {
        assert!(matches!(
            create_contract("american", 100.0, 100.0, 0.05, 0.2, 1.0, "put", Some(0)),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "forward", None),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            create_contract("european", 100.0, -5.0, 0.05, 0.2, 1.0, "call", None),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            create_contract("european", 100.0, 100.0, 0.05, 0.2, -1.0, "call", None),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            create_contract("lookback", 100.0, 100.0, 0.05, 0.2, 1.0, "call", None),
            Err(PricingError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_create_contract_fields() {
        let c = create_contract("american_option", 95.0, 100.0, 0.01, 0.3, 0.5, "P", Some(40)).unwrap();
        assert_eq!(c.side(), OptionSide::Put);
        assert_eq!(c.model(), ValuationModel::American { steps: 40 });
        assert_eq!(c.spot(), 95.0);
        assert_eq!(c.strike(), 100.0);
    }
}
