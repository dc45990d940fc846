//! Greek surfaces over a spot × volatility grid.
//!
//! The grid spans spots 0.8S..1.2S and volatilities 0.5σ..2σ with
//! `grid_size + 1` points on each axis; every node is a European call.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{OptionSide, PricingError};

use super::BlackScholes;

/// Which Greek a surface holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GreekKind {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂t
    Theta,
    /// ∂V/∂r
    Rho,
}

impl GreekKind {
    /// Every supported Greek.
    pub const ALL: [GreekKind; 5] = [
        GreekKind::Delta,
        GreekKind::Gamma,
        GreekKind::Vega,
        GreekKind::Theta,
        GreekKind::Rho,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GreekKind::Delta => "delta",
            GreekKind::Gamma => "gamma",
            GreekKind::Vega => "vega",
            GreekKind::Theta => "theta",
            GreekKind::Rho => "rho",
        }
    }

    fn evaluate(&self, bs: &BlackScholes, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        let side = OptionSide::Call;
        match self {
            GreekKind::Delta => bs.delta(strike, expiry, side),
            GreekKind::Gamma => bs.gamma(strike, expiry),
            GreekKind::Vega => bs.vega(strike, expiry),
            GreekKind::Theta => bs.theta(strike, expiry, side),
            GreekKind::Rho => bs.rho(strike, expiry, side),
        }
    }
}

impl FromStr for GreekKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delta" => Ok(GreekKind::Delta),
            "gamma" => Ok(GreekKind::Gamma),
            "vega" => Ok(GreekKind::Vega),
            "theta" => Ok(GreekKind::Theta),
            "rho" => Ok(GreekKind::Rho),
            other => Err(PricingError::InvalidParameter(format!(
                "unknown greek '{}': expected delta, gamma, vega, theta or rho",
                other
            ))),
        }
    }
}

impl fmt::Display for GreekKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Greek values on a spot × volatility grid.
///
/// `values[i][j]` is the Greek at `spots[i]` and `vols[j]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreekSurface {
    /// Greek on the surface.
    pub greek: GreekKind,
    /// Spot axis, ascending.
    pub spots: Vec<f64>,
    /// Volatility axis, ascending.
    pub vols: Vec<f64>,
    /// Row per spot, column per volatility.
    pub values: Vec<Vec<f64>>,
}

/// Builds a European-call Greek surface around (spot, volatility).
///
/// # Errors
/// `PricingError::InvalidParameter` if `grid_size == 0`, spot, strike,
/// volatility or expiry is not strictly positive.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{greek_surface, GreekKind};
///
/// let surface = greek_surface(100.0, 100.0, 0.05, 0.2, 1.0, GreekKind::Delta, 4).unwrap();
/// assert_eq!(surface.spots.len(), 5);
/// assert_eq!(surface.values[0].len(), 5);
/// assert!((surface.spots[0] - 80.0).abs() < 1e-12);
/// assert!((surface.vols[4] - 0.4).abs() < 1e-12);
/// ```
pub fn greek_surface(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    greek: GreekKind,
    grid_size: usize,
) -> Result<GreekSurface, PricingError> {
    if grid_size == 0 {
        return Err(PricingError::InvalidParameter(
            "grid size must be >= 1".to_string(),
        ));
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PricingError::not_positive("strike", strike));
    }
    if !(expiry.is_finite() && expiry > 0.0) {
        return Err(PricingError::not_positive("time to expiry", expiry));
    }
    // Spot, volatility and rate are checked by BlackScholes::new
    BlackScholes::new(spot, rate, volatility)?;

    let n = grid_size as f64;
    let spots: Vec<f64> = (0..=grid_size)
        .map(|i| spot * (0.8 + 0.4 * i as f64 / n))
        .collect();
    let vols: Vec<f64> = (0..=grid_size)
        .map(|i| volatility * (0.5 + 1.5 * i as f64 / n))
        .collect();

    let values = spots
        .iter()
        .map(|&s| {
            vols.iter()
                .map(|&v| greek.evaluate(&BlackScholes::new(s, rate, v)?, strike, expiry))
                .collect::<Result<Vec<f64>, PricingError>>()
        })
        .collect::<Result<Vec<Vec<f64>>, PricingError>>()?;

    Ok(GreekSurface {
        greek,
        spots,
        vols,
        values,
    })
}
