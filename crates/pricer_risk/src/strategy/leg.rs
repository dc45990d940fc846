//! Strategy legs.

use pricer_core::traits::Valuation;
use pricer_core::types::{OptionSide, PricingError};
use pricer_models::instruments::Contract;

/// One holding in a strategy: a contract, a signed quantity and the premium
/// paid (or received) when the leg was added.
///
/// The entry premium is the contract's price at construction and never
/// changes afterwards, even when the contract is revalued.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Leg {
    contract: Contract,
    quantity: i64,
    entry_premium: f64,
}

impl Leg {
    /// Prices `contract` once and freezes the result as the entry premium.
    ///
    /// # Errors
    /// - `PricingError::InvalidParameter` for a zero quantity
    /// - any valuation error raised while pricing the contract
    pub fn new(contract: Contract, quantity: i64) -> Result<Self, PricingError> {
        if quantity == 0 {
            return Err(PricingError::InvalidParameter(
                "leg quantity must be non-zero".to_string(),
            ));
        }
        let entry_premium = contract.price()?;
        Ok(Self {
            contract,
            quantity,
            entry_premium,
        })
    }

    /// Contract held by this leg.
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub(crate) fn contract_mut(&mut self) -> &mut Contract {
        &mut self.contract
    }

    /// Signed quantity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Price per unit at entry.
    pub fn entry_premium(&self) -> f64 {
        self.entry_premium
    }

    /// Quantity-weighted expiry P&L: quantity·(intrinsic(spot) − entry premium).
    pub fn payoff(&self, spot_at_expiry: f64) -> f64 {
        self.quantity as f64 * (self.contract.intrinsic_at(spot_at_expiry) - self.entry_premium)
    }

    /// Flat read-only description of the leg.
    pub fn summary(&self) -> LegSummary {
        LegSummary {
            strike: self.contract.strike(),
            entry_price: self.entry_premium,
            quantity: self.quantity,
            side: self.contract.side(),
            model: self.contract.model_kind(),
        }
    }
}

/// Read-only leg description for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LegSummary {
    /// Strike price.
    pub strike: f64,
    /// Entry premium per unit.
    pub entry_price: f64,
    /// Signed quantity.
    pub quantity: i64,
    /// Call or put.
    pub side: OptionSide,
    /// Valuation model name.
    pub model: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::create_contract;

    fn put() -> Contract {
        create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "put", None).unwrap()
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(matches!(Leg::new(put(), 0), Err(PricingError::InvalidParameter(_))));
    }

    #[test]
    fn test_entry_premium_frozen() {
        let mut leg = Leg::new(put(), 2).unwrap();
        let premium = leg.entry_premium();
        assert_relative_eq!(premium, 5.5735, epsilon = 1e-3);

        leg.contract_mut().set_spot(80.0).unwrap();
        assert_eq!(leg.entry_premium(), premium);
        assert!(leg.contract().price().unwrap() > premium);
    }

    #[test]
    fn test_payoff() {
        let leg = Leg::new(put(), -1).unwrap();
        let premium = leg.entry_premium();
        assert_relative_eq!(leg.payoff(120.0), premium, epsilon = 1e-12);
        assert_relative_eq!(leg.payoff(90.0), -(10.0 - premium), epsilon = 1e-12);
    }

    #[test]
    fn test_summary() {
        let summary = Leg::new(put(), 3).unwrap().summary();
        assert_eq!(summary.strike, 100.0);
        assert_eq!(summary.quantity, 3);
        assert_eq!(summary.side, OptionSide::Put);
        assert_eq!(summary.model, "european");
    }
}
