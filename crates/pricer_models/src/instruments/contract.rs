//! A vanilla option bound to its valuation model.

use pricer_core::traits::Valuation;
use pricer_core::types::{Greeks, OptionSide, PricingError};

use super::OptionParams;
use crate::models::ValuationModel;

/// Option contract: validated parameters plus the model that values them.
///
/// Only spot and volatility can change after construction, and only through
/// validating setters. Evaluation never mutates the contract, so `&Contract`
/// can be shared freely across threads.
///
/// # Examples
/// ```
/// use pricer_core::traits::Valuation;
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::{Contract, OptionParams};
/// use pricer_models::models::ValuationModel;
///
/// let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Call).unwrap();
/// let mut contract = Contract::new(params, ValuationModel::European).unwrap();
/// assert!((contract.price().unwrap() - 10.45).abs() < 0.01);
///
/// contract.set_spot(110.0).unwrap();
/// assert!(contract.price().unwrap() > 17.0);
/// assert!(contract.set_spot(-1.0).is_err());
/// assert_eq!(contract.spot(), 110.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Contract {
    params: OptionParams,
    model: ValuationModel,
}

impl Contract {
    /// Binds `params` to `model`.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for an American model with zero steps.
    pub fn new(params: OptionParams, model: ValuationModel) -> Result<Self, PricingError> {
        if model.steps() == Some(0) {
            return Err(PricingError::InvalidParameter(
                "lattice steps must be >= 1".to_string(),
            ));
        }
        Ok(Self { params, model })
    }

    /// European contract.
    pub fn european(params: OptionParams) -> Self {
        Self {
            params,
            model: ValuationModel::European,
        }
    }

    /// Underlying parameters.
    #[inline]
    pub fn params(&self) -> &OptionParams {
        &self.params
    }

    /// Valuation model.
    #[inline]
    pub fn model(&self) -> ValuationModel {
        self.model
    }

    /// Short model name (`"european"` or `"american"`).
    #[inline]
    pub fn model_kind(&self) -> &'static str {
        self.model.model_name()
    }

    /// Current spot.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.params.spot()
    }

    /// Strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.params.strike()
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.params.rate()
    }

    /// Current volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.params.volatility()
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.params.expiry()
    }

    /// Call or put.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.params.side()
    }

    /// Intrinsic value at an arbitrary spot, ignoring the live spot.
    #[inline]
    pub fn intrinsic_at(&self, spot: f64) -> f64 {
        self.params.side().intrinsic(spot, self.params.strike())
    }

    /// Moves the spot. The contract is unchanged on error.
    pub fn set_spot(&mut self, spot: f64) -> Result<(), PricingError> {
        self.params = self.params.with_spot(spot)?;
        Ok(())
    }

    /// Moves the volatility. The contract is unchanged on error.
    pub fn set_volatility(&mut self, volatility: f64) -> Result<(), PricingError> {
        self.params = self.params.with_volatility(volatility)?;
        Ok(())
    }

    /// Copy revalued at a new spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Ok(Self {
            params: self.params.with_spot(spot)?,
            model: self.model,
        })
    }

    /// Copy revalued at a new volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Ok(Self {
            params: self.params.with_volatility(volatility)?,
            model: self.model,
        })
    }
}

impl Valuation for Contract {
    fn price(&self) -> Result<f64, PricingError> {
        self.model.price(&self.params)
    }

    fn delta(&self) -> Result<f64, PricingError> {
        self.model.delta(&self.params)
    }

    fn gamma(&self) -> Result<f64, PricingError> {
        self.model.gamma(&self.params)
    }

    fn vega(&self) -> Result<f64, PricingError> {
        self.model.vega(&self.params)
    }

    fn theta(&self) -> Result<f64, PricingError> {
        self.model.theta(&self.params)
    }

    fn rho(&self) -> Result<f64, PricingError> {
        self.model.rho(&self.params)
    }

    fn greeks(&self) -> Result<Greeks, PricingError> {
        self.model.greeks(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn put(model: ValuationModel) -> Contract {
        let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Put).unwrap();
        Contract::new(params, model).unwrap()
    }

    #[test]
    fn test_zero_step_model_rejected() {
        let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Put).unwrap();
        assert!(matches!(
            Contract::new(params, ValuationModel::American { steps: 0 }),
            Err(PricingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let c = put(ValuationModel::American { steps: 50 });
        assert_eq!(c.spot(), 100.0);
        assert_eq!(c.strike(), 100.0);
        assert_eq!(c.rate(), 0.05);
        assert_eq!(c.volatility(), 0.2);
        assert_eq!(c.expiry(), 1.0);
        assert_eq!(c.side(), OptionSide::Put);
        assert_eq!(c.model_kind(), "american");
        assert_eq!(c.intrinsic_at(80.0), 20.0);
    }

    #[test]
    fn test_setters_leave_contract_unchanged_on_error() {
        let mut c = put(ValuationModel::European);
        assert!(c.set_volatility(0.0).is_err());
        assert!(c.set_spot(f64::NAN).is_err());
        assert_eq!(c.volatility(), 0.2);
        assert_eq!(c.spot(), 100.0);

        c.set_volatility(0.3).unwrap();
        assert_eq!(c.volatility(), 0.3);
    }

    #[test]
    fn test_with_spot_copies() {
        let c = put(ValuationModel::European);
        let moved = c.with_spot(90.0).unwrap();
        assert_eq!(c.spot(), 100.0);
        assert_eq!(moved.spot(), 90.0);
        assert!(moved.price().unwrap() > c.price().unwrap());
    }

    #[test]
    fn test_valuation_greeks_consistent() {
        let c = put(ValuationModel::European);
        let g = c.greeks().unwrap();
        assert_relative_eq!(g.delta, c.delta().unwrap());
        assert_relative_eq!(g.vega, c.vega().unwrap());
        assert_relative_eq!(g.theta, c.theta().unwrap());
    }
}
