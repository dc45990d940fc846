//! Multi-leg option strategies.
//!
//! A [`Strategy`] owns its contracts. Aggregates are quantity-weighted sums
//! over the legs and do not depend on leg order beyond floating-point
//! rounding. The [`StrategyFactory`] builds the standard combinations by
//! name.

mod factory;
mod leg;
mod payoff;

use std::fmt;

use pricer_core::traits::Valuation;
use pricer_core::types::{Greeks, PricingError};
use pricer_models::instruments::Contract;

use crate::scenarios::Position;

pub use factory::{StrategyFactory, Underlying};
pub use leg::{Leg, LegSummary};
pub use payoff::ExpiryExtremes;

/// Shape of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    /// Call and put at one strike.
    Straddle,
    /// Put below and call above the anchor.
    Strangle,
    /// Long call K1, short call K2 > K1.
    BullCall,
    /// Short strangle protected by a long strangle.
    IronCondor,
    /// Legs added by hand.
    #[default]
    Custom,
}

impl StrategyKind {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Straddle => "straddle",
            StrategyKind::Strangle => "strangle",
            StrategyKind::BullCall => "bull_call",
            StrategyKind::IronCondor => "iron_condor",
            StrategyKind::Custom => "custom",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered collection of legs.
///
/// # Examples
/// ```
/// use pricer_risk::strategy::{Strategy, StrategyKind};
/// use pricer_models::instruments::create_contract;
///
/// let call = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "call", None).unwrap();
/// let put = create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "put", None).unwrap();
///
/// let mut straddle = Strategy::new(StrategyKind::Straddle);
/// straddle.add_leg(call, 1).unwrap();
/// straddle.add_leg(put, 1).unwrap();
///
/// // net debit ≈ 10.45 + 5.57
/// assert!((straddle.total_price() - 16.02).abs() < 0.01);
/// // long straddle at expiry with spot at the strike loses the premium
/// assert!((straddle.payoff(100.0) + straddle.total_price()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Strategy {
    kind: StrategyKind,
    legs: Vec<Leg>,
}

impl Strategy {
    /// Empty strategy of the given kind.
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            legs: Vec::new(),
        }
    }

    /// Strategy shape.
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Prices `contract` once and appends it as a leg.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for a zero quantity; valuation
    /// errors from pricing the contract. The strategy is unchanged on error.
    pub fn add_leg(&mut self, contract: Contract, quantity: i64) -> Result<(), PricingError> {
        self.legs.push(Leg::new(contract, quantity)?);
        Ok(())
    }

    /// Legs in insertion order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Flat per-leg descriptions.
    pub fn leg_summaries(&self) -> Vec<LegSummary> {
        self.legs.iter().map(Leg::summary).collect()
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// True when the strategy has no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Net premium, Σ quantity·entry premium. Positive for a net debit.
    pub fn total_price(&self) -> f64 {
        self.legs
            .iter()
            .map(|leg| leg.quantity() as f64 * leg.entry_premium())
            .sum()
    }

    /// Σ quantity·live price.
    pub fn mark_to_market(&self) -> Result<f64, PricingError> {
        self.weighted(|c| c.price())
    }

    /// Σ quantity·delta.
    pub fn total_delta(&self) -> Result<f64, PricingError> {
        self.weighted(|c| c.delta())
    }

    /// Σ quantity·gamma.
    pub fn total_gamma(&self) -> Result<f64, PricingError> {
        self.weighted(|c| c.gamma())
    }

    /// Σ quantity·vega.
    pub fn total_vega(&self) -> Result<f64, PricingError> {
        self.weighted(|c| c.vega())
    }

    /// Σ quantity·theta.
    pub fn total_theta(&self) -> Result<f64, PricingError> {
        self.weighted(|c| c.theta())
    }

    /// Σ quantity·rho.
    pub fn total_rho(&self) -> Result<f64, PricingError> {
        self.weighted(|c| c.rho())
    }

    /// All five aggregated Greeks.
    pub fn total_greeks(&self) -> Result<Greeks, PricingError> {
        self.legs
            .iter()
            .map(|leg| Ok::<_, PricingError>(leg.contract().greeks()?.scaled(leg.quantity() as f64)))
            .sum()
    }

    /// Expiry P&L at `spot_at_expiry`, net of entry premiums.
    ///
    /// Independent of the contracts' live spots.
    pub fn payoff(&self, spot_at_expiry: f64) -> f64 {
        self.legs.iter().map(|leg| leg.payoff(spot_at_expiry)).sum()
    }

    /// Moves every leg to `spot`; entry premiums are kept.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for a non-positive or non-finite
    /// spot, in which case no leg is moved.
    pub fn set_spot(&mut self, spot: f64) -> Result<(), PricingError> {
        let moved = self
            .legs
            .iter()
            .map(|leg| leg.contract().with_spot(spot))
            .collect::<Result<Vec<_>, _>>()?;
        for (leg, contract) in self.legs.iter_mut().zip(moved) {
            *leg.contract_mut() = contract;
        }
        Ok(())
    }

    /// Read-only position views for the risk engine.
    pub fn positions(&self) -> Vec<Position<'_>> {
        self.legs
            .iter()
            .map(|leg| Position::new(leg.contract(), leg.quantity()))
            .collect()
    }

    fn weighted<F>(&self, measure: F) -> Result<f64, PricingError>
    where
        F: Fn(&Contract) -> Result<f64, PricingError>,
    {
        self.legs
            .iter()
            .map(|leg| Ok::<_, PricingError>(leg.quantity() as f64 * measure(leg.contract())?))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::create_contract;

    fn contract(model: &str, strike: f64, side: &str) -> Contract {
        create_contract(model, 100.0, strike, 0.05, 0.2, 1.0, side, Some(50)).unwrap()
    }

    fn mixed() -> Strategy {
        let mut s = Strategy::default();
        s.add_leg(contract("european", 95.0, "put"), 2).unwrap();
        s.add_leg(contract("american", 100.0, "put"), -1).unwrap();
        s.add_leg(contract("european", 105.0, "call"), 3).unwrap();
        s
    }

    #[test]
    fn test_empty_strategy() {
        let s = Strategy::new(StrategyKind::Custom);
        assert!(s.is_empty());
        assert_eq!(s.total_price(), 0.0);
        assert_eq!(s.payoff(123.0), 0.0);
        assert_eq!(s.total_greeks().unwrap(), Greeks::default());
    }

    #[test]
    fn test_zero_quantity_leaves_strategy_unchanged() {
        let mut s = mixed();
        assert!(s.add_leg(contract("european", 100.0, "call"), 0).is_err());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_totals_match_component_sums() {
        let s = mixed();
        let greeks = s.total_greeks().unwrap();
        assert_relative_eq!(greeks.delta, s.total_delta().unwrap(), epsilon = 1e-12);
        assert_relative_eq!(greeks.gamma, s.total_gamma().unwrap(), epsilon = 1e-12);
        assert_relative_eq!(greeks.vega, s.total_vega().unwrap(), epsilon = 1e-10);
        assert_relative_eq!(greeks.theta, s.total_theta().unwrap(), epsilon = 1e-10);
        assert_relative_eq!(greeks.rho, s.total_rho().unwrap(), epsilon = 1e-10);
        assert_relative_eq!(s.mark_to_market().unwrap(), s.total_price(), epsilon = 1e-12);
    }

    #[test]
    fn test_order_independence() {
        let s = mixed();
        let mut reversed = Strategy::default();
        for leg in s.legs().iter().rev() {
            reversed.add_leg(*leg.contract(), leg.quantity()).unwrap();
        }
        assert_relative_eq!(s.total_price(), reversed.total_price(), epsilon = 1e-12);
        assert_relative_eq!(s.total_delta().unwrap(), reversed.total_delta().unwrap(), epsilon = 1e-12);
        assert_relative_eq!(s.payoff(97.0), reversed.payoff(97.0), epsilon = 1e-12);
    }

    #[test]
    fn test_set_spot_keeps_entry_premiums() {
        let mut s = mixed();
        let entry = s.total_price();
        s.set_spot(110.0).unwrap();

        assert_eq!(s.total_price(), entry);
        assert!(s.legs().iter().all(|leg| leg.contract().spot() == 110.0));
        assert!((s.mark_to_market().unwrap() - entry).abs() > 1e-6);
    }

    #[test]
    fn test_set_spot_is_atomic() {
        let mut s = mixed();
        let before = s.clone();
        assert!(matches!(s.set_spot(-5.0), Err(PricingError::InvalidParameter(_))));
        assert_eq!(s, before);
    }

    #[test]
    fn test_payoff_ignores_live_spot() {
        let mut s = mixed();
        let at_expiry = s.payoff(90.0);
        s.set_spot(130.0).unwrap();
        assert_eq!(s.payoff(90.0), at_expiry);
    }

    #[test]
    fn test_positions_mirror_legs() {
        let s = mixed();
        let positions = s.positions();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[1].quantity, -1);
        assert_eq!(positions[1].contract.model_kind(), "american");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(StrategyKind::BullCall.to_string(), "bull_call");
        assert_eq!(StrategyKind::default(), StrategyKind::Custom);
    }
}
