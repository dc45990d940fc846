//! Implied volatility inversion of the Black-Scholes price.
//!
//! Newton-Raphson with analytical vega from σ = 0.2 first; if it fails or
//! leaves the search interval, Brent on [1e-4, 5] finishes the job.

use pricer_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::{OptionSide, PricingError};
use tracing::debug;

use super::BlackScholes;

/// Lower end of the volatility search interval.
pub const MIN_IMPLIED_VOL: f64 = 1e-4;
/// Upper end of the volatility search interval.
pub const MAX_IMPLIED_VOL: f64 = 5.0;

const INITIAL_GUESS: f64 = 0.2;

/// Volatility that reproduces `market_price` under Black-Scholes.
///
/// # Errors
/// - `PricingError::InvalidParameter` if spot or strike is not positive,
///   expiry is not positive, or the price violates the no-arbitrage bounds
/// - `PricingError::NumericalDegeneracy` if no volatility in [1e-4, 5]
///   reproduces the price
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::implied_volatility;
///
/// let vol = implied_volatility(10.450583572185565, 100.0, 100.0, 0.05, 1.0, OptionSide::Call).unwrap();
/// assert!((vol - 0.2).abs() < 1e-8);
/// ```
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    side: OptionSide,
) -> Result<f64, PricingError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(PricingError::not_positive("spot", spot));
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PricingError::not_positive("strike", strike));
    }
    if !(expiry.is_finite() && expiry > 0.0) {
        return Err(PricingError::not_positive("time to expiry", expiry));
    }
    if !rate.is_finite() {
        return Err(PricingError::InvalidParameter(format!(
            "rate must be finite, got {}",
            rate
        )));
    }

    let discounted_strike = strike * (-rate * expiry).exp();
    let (lower, upper) = match side {
        OptionSide::Call => ((spot - discounted_strike).max(0.0), spot),
        OptionSide::Put => ((discounted_strike - spot).max(0.0), discounted_strike),
    };
    if !(market_price.is_finite() && market_price > lower && market_price < upper) {
        return Err(PricingError::InvalidParameter(format!(
            "market price {} outside no-arbitrage bounds ({}, {})",
            market_price, lower, upper
        )));
    }

    let objective = |vol: f64| {
        BlackScholes::new(spot, rate, vol)
            .and_then(|bs| bs.price(strike, expiry, side))
            .map_or(f64::NAN, |price| price - market_price)
    };
    let vega = |vol: f64| {
        BlackScholes::new(spot, rate, vol)
            .and_then(|bs| bs.vega(strike, expiry))
            .unwrap_or(0.0)
    };

    let config = SolverConfig::new(1e-10, 100);
    let newton = NewtonRaphsonSolver::new(config).find_root(objective, vega, INITIAL_GUESS);
    match newton {
        Ok(vol) if (MIN_IMPLIED_VOL..=MAX_IMPLIED_VOL).contains(&vol) => Ok(vol),
        other => {
            debug!(?other, "newton implied vol rejected, falling back to brent");
            let vol = BrentSolver::new(config).find_root(objective, MIN_IMPLIED_VOL, MAX_IMPLIED_VOL)?;
            Ok(vol)
        }
    }
}
