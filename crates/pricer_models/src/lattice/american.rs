//! American option valuation on the CRR lattice.
//!
//! Greeks are finite differences:
//! - delta reuses the base lattice's u and d: (V(S·u) − V(S·d)) / (S(u − d))
//! - gamma is the central difference of that delta at S(1 ± 1%)
//! - vega and rho rebuild the lattice at σ ± 0.01 and r ± 0.01
//! - theta is a forward difference against one trading day less
//!
//! All rollbacks of one Greek share a single layer buffer.

use pricer_core::types::PricingError;

use super::binomial::BinomialLattice;
use crate::instruments::OptionParams;

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 100;

/// Relative spot bump for gamma.
const SPOT_BUMP: f64 = 0.01;
/// Absolute volatility bump for vega.
const VOL_BUMP: f64 = 0.01;
/// Absolute rate bump for rho.
const RATE_BUMP: f64 = 0.01;
/// One trading day in years.
const ONE_DAY: f64 = 1.0 / 252.0;

/// American exercise valued by backward induction on an N-step lattice.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::OptionParams;
/// use pricer_models::lattice::AmericanBinomial;
///
/// let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Put).unwrap();
/// let model = AmericanBinomial::new(200).unwrap();
/// let price = model.price(&params).unwrap();
/// assert!(price > 5.57); // early-exercise premium over the European put
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmericanBinomial {
    steps: usize,
}

impl Default for AmericanBinomial {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
        }
    }
}

impl AmericanBinomial {
    /// Creates a model with `steps` lattice layers.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `steps == 0`.
    pub fn new(steps: usize) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::InvalidParameter(
                "lattice steps must be >= 1".to_string(),
            ));
        }
        Ok(Self { steps })
    }

    /// Number of lattice steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn lattice(&self, params: &OptionParams) -> Result<BinomialLattice, PricingError> {
        BinomialLattice::new(self.steps, params.expiry(), params.volatility(), params.rate())
    }

    /// Price with a rebuilt lattice, intrinsic at expiry.
    fn value(&self, params: &OptionParams, values: &mut Vec<f64>) -> Result<f64, PricingError> {
        if params.is_expired() {
            return Ok(params.intrinsic());
        }
        let lattice = self.lattice(params)?;
        Ok(lattice.rollback(values, params.spot(), params.strike(), params.side()))
    }

    /// Lattice delta at an arbitrary spot, sharing `values`.
    fn delta_at(&self, params: &OptionParams, spot: f64, values: &mut Vec<f64>) -> Result<f64, PricingError> {
        let lattice = self.lattice(params)?;
        let (u, d) = (lattice.up(), lattice.down());
        let (strike, side) = (params.strike(), params.side());
        let up = lattice.rollback(values, spot * u, strike, side);
        let down = lattice.rollback(values, spot * d, strike, side);
        Ok((up - down) / (spot * (u - d)))
    }

    /// Present value.
    pub fn price(&self, params: &OptionParams) -> Result<f64, PricingError> {
        let mut values = Vec::with_capacity(self.steps + 1);
        finite("price", self.value(params, &mut values)?)
    }

    /// Lattice delta.
    pub fn delta(&self, params: &OptionParams) -> Result<f64, PricingError> {
        if params.is_expired() {
            return Ok(params.expiry_delta());
        }
        let mut values = Vec::with_capacity(self.steps + 1);
        finite("delta", self.delta_at(params, params.spot(), &mut values)?)
    }

    /// Central difference of the lattice delta over S(1 ± 1%).
    pub fn gamma(&self, params: &OptionParams) -> Result<f64, PricingError> {
        if params.is_expired() {
            return Ok(0.0);
        }
        let mut values = Vec::with_capacity(self.steps + 1);
        let spot = params.spot();
        let h = SPOT_BUMP * spot;
        let up = self.delta_at(params, spot + h, &mut values)?;
        let down = self.delta_at(params, spot - h, &mut values)?;
        finite("gamma", (up - down) / (2.0 * h))
    }

    /// ∂V/∂σ per unit of volatility.
    ///
    /// Central over σ ± 0.01; forward from σ when σ ≤ 0.01 keeps the
    /// bumped volatility positive.
    pub fn vega(&self, params: &OptionParams) -> Result<f64, PricingError> {
        if params.is_expired() {
            return Ok(0.0);
        }
        let mut values = Vec::with_capacity(self.steps + 1);
        let vol = params.volatility();
        let up = self.value(&params.with_volatility(vol + VOL_BUMP)?, &mut values)?;
        let vega = if vol > VOL_BUMP {
            let down = self.value(&params.with_volatility(vol - VOL_BUMP)?, &mut values)?;
            (up - down) / (2.0 * VOL_BUMP)
        } else {
            let base = self.value(params, &mut values)?;
            (up - base) / VOL_BUMP
        };
        finite("vega", vega)
    }

    /// ∂V/∂t per year, forward against T − 1/252 (floored at zero).
    pub fn theta(&self, params: &OptionParams) -> Result<f64, PricingError> {
        if params.is_expired() {
            return Ok(0.0);
        }
        let mut values = Vec::with_capacity(self.steps + 1);
        let base = self.value(params, &mut values)?;
        let shorter = params.with_expiry((params.expiry() - ONE_DAY).max(0.0))?;
        let later = self.value(&shorter, &mut values)?;
        finite("theta", (later - base) / ONE_DAY)
    }

    /// ∂V/∂r per unit of rate, central over r ± 0.01.
    pub fn rho(&self, params: &OptionParams) -> Result<f64, PricingError> {
        if params.is_expired() {
            return Ok(0.0);
        }
        let mut values = Vec::with_capacity(self.steps + 1);
        let rate = params.rate();
        let up = self.value(&params.with_rate(rate + RATE_BUMP)?, &mut values)?;
        let down = self.value(&params.with_rate(rate - RATE_BUMP)?, &mut values)?;
        finite("rho", (up - down) / (2.0 * RATE_BUMP))
    }
}

fn finite(what: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NumericalDegeneracy(format!(
            "lattice {} evaluated to {}",
            what, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use pricer_core::types::OptionSide;
    use approx::assert_relative_eq;

    fn params(side: OptionSide) -> OptionParams {
        OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, side).unwrap()
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(
            AmericanBinomial::new(0),
            Err(PricingError::InvalidParameter(_))
        ));
        assert_eq!(AmericanBinomial::default().steps(), DEFAULT_STEPS);
    }

    #[test]
    fn test_put_has_early_exercise_premium() {
        let model = AmericanBinomial::default();
        let american = model.price(&params(OptionSide::Put)).unwrap();
        let european = BlackScholes::new(100.0, 0.05, 0.2)
            .unwrap()
            .price(100.0, 1.0, OptionSide::Put)
            .unwrap();
        assert!(american > european + 0.3, "american {} european {}", american, european);
    }

    #[test]
    fn test_call_converges_to_european() {
        // No dividends: early exercise of a call is never optimal
        let american = AmericanBinomial::new(1000).unwrap().price(&params(OptionSide::Call)).unwrap();
        assert_relative_eq!(american, 10.450583572185565, epsilon = 5e-3);
    }

    #[test]
    fn test_greeks_close_to_black_scholes_for_call() {
        let model = AmericanBinomial::new(400).unwrap();
        let p = params(OptionSide::Call);
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        assert_relative_eq!(model.delta(&p).unwrap(), bs.delta(100.0, 1.0, OptionSide::Call).unwrap(), epsilon = 5e-3);
        assert_relative_eq!(model.gamma(&p).unwrap(), bs.gamma(100.0, 1.0).unwrap(), epsilon = 2e-3);
        assert_relative_eq!(model.vega(&p).unwrap(), bs.vega(100.0, 1.0).unwrap(), epsilon = 0.5);
        assert_relative_eq!(model.rho(&p).unwrap(), bs.rho(100.0, 1.0, OptionSide::Call).unwrap(), epsilon = 0.5);
        assert_relative_eq!(model.theta(&p).unwrap(), bs.theta(100.0, 1.0, OptionSide::Call).unwrap(), epsilon = 0.5);
    }

    #[test]
    fn test_put_greek_signs() {
        let model = AmericanBinomial::default();
        let p = params(OptionSide::Put);
        let delta = model.delta(&p).unwrap();
        assert!(delta < 0.0 && delta > -1.0);
        assert!(model.gamma(&p).unwrap() > 0.0);
        assert!(model.vega(&p).unwrap() > 0.0);
        assert!(model.theta(&p).unwrap() < 0.0);
        assert!(model.rho(&p).unwrap() < 0.0);
    }

    #[test]
    fn test_low_volatility_vega_uses_forward_difference() {
        let model = AmericanBinomial::new(50).unwrap();
        let p = OptionParams::new(100.0, 100.0, 0.0, 0.005, 1.0, OptionSide::Call).unwrap();
        let vega = model.vega(&p).unwrap();
        let up = model.price(&p.with_volatility(0.015).unwrap()).unwrap();
        let base = model.price(&p).unwrap();
        assert_relative_eq!(vega, (up - base) / 0.01, epsilon = 1e-10);
    }

    #[test]
    fn test_expired_contract_uses_boundary_values() {
        let model = AmericanBinomial::default();
        let p = OptionParams::new(90.0, 100.0, 0.05, 0.2, 0.0, OptionSide::Put).unwrap();
        assert_eq!(model.price(&p).unwrap(), 10.0);
        assert_eq!(model.delta(&p).unwrap(), -1.0);
        assert_eq!(model.gamma(&p).unwrap(), 0.0);
        assert_eq!(model.vega(&p).unwrap(), 0.0);
        assert_eq!(model.theta(&p).unwrap(), 0.0);
        assert_eq!(model.rho(&p).unwrap(), 0.0);
    }

    #[test]
    fn test_last_day_theta_floors_at_expiry() {
        let model = AmericanBinomial::new(10).unwrap();
        let p = OptionParams::new(100.0, 100.0, 0.05, 0.2, 0.5 / 252.0, OptionSide::Call).unwrap();
        let theta = model.theta(&p).unwrap();
        let base = model.price(&p).unwrap();
        assert_relative_eq!(theta, (0.0 - base) * 252.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_lattice_surfaces_error() {
        let model = AmericanBinomial::new(1).unwrap();
        let p = OptionParams::new(100.0, 100.0, 0.5, 0.01, 1.0, OptionSide::Put).unwrap();
        assert!(matches!(
            model.price(&p),
            Err(PricingError::NumericalDegeneracy(_))
        ));
    }
}
