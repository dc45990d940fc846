//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Units
//!
//! Vega and rho are raw (per unit of volatility and rate), theta and charm
//! are per year. At `T <= 0` prices are intrinsic and the Greeks are the
//! limits of the intrinsic payoff.

use pricer_core::types::{OptionSide, PricingError};

use super::distributions::{norm_cdf, norm_pdf};

/// Smallest σ√T accepted by the closed form.
pub const MIN_VOL_SQRT_T: f64 = 1e-12;

/// Black-Scholes model for European option pricing.
///
/// Every method returns `Err(PricingError::NumericalDegeneracy)` when
/// 0 < σ√T < [`MIN_VOL_SQRT_T`] or the result is not finite.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionSide::Call).unwrap();
/// let put = bs.price(100.0, 1.0, OptionSide::Put).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

/// d₁, d₂ and the quantities shared by every formula.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    discount: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if spot or volatility is not
    /// strictly positive and finite, or the rate is not finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::not_positive("spot", spot));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::not_positive("volatility", volatility));
        }
        if !rate.is_finite() {
            return Err(PricingError::InvalidParameter(format!(
                "rate must be finite, got {}",
                rate
            )));
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `None` at or past expiry, otherwise the shared terms.
    fn terms(&self, strike: f64, expiry: f64) -> Result<Option<Terms>, PricingError> {
        if expiry <= 0.0 {
            return Ok(None);
        }

        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = self.volatility * sqrt_t;
        if vol_sqrt_t < MIN_VOL_SQRT_T {
            return Err(PricingError::NumericalDegeneracy(format!(
                "σ√T = {:e} is too small for the closed form",
                vol_sqrt_t
            )));
        }

        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;

        Ok(Some(Terms {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount: (-self.rate * expiry).exp(),
        }))
    }

    /// Computes d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T).
    ///
    /// Returns `None` when `expiry <= 0`.
    pub fn d1(&self, strike: f64, expiry: f64) -> Result<Option<f64>, PricingError> {
        Ok(self.terms(strike, expiry)?.map(|t| t.d1))
    }

    /// Computes d₂ = d₁ - σ√T.
    ///
    /// Returns `None` when `expiry <= 0`.
    pub fn d2(&self, strike: f64, expiry: f64) -> Result<Option<f64>, PricingError> {
        Ok(self.terms(strike, expiry)?.map(|t| t.d2))
    }

    /// Computes the European option price.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionSide;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let call = bs.price(100.0, 1.0, OptionSide::Call).unwrap();
    /// assert!((call - 10.4506).abs() < 1e-4);
    ///
    /// // Expired: intrinsic value
    /// assert_eq!(bs.price(90.0, 0.0, OptionSide::Call).unwrap(), 10.0);
    /// ```
    pub fn price(&self, strike: f64, expiry: f64, side: OptionSide) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => side.intrinsic(self.spot, strike),
            Some(t) => match side {
                OptionSide::Call => {
                    self.spot * norm_cdf(t.d1) - strike * t.discount * norm_cdf(t.d2)
                }
                OptionSide::Put => {
                    strike * t.discount * norm_cdf(-t.d2) - self.spot * norm_cdf(-t.d1)
                }
            },
        };
        finite("price", value)
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) - 1
    ///
    /// At expiry: call 1 if S > K else 0, put -1 if S < K else 0.
    pub fn delta(&self, strike: f64, expiry: f64, side: OptionSide) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => match side {
                OptionSide::Call if self.spot > strike => 1.0,
                OptionSide::Put if self.spot < strike => -1.0,
                _ => 0.0,
            },
            Some(t) => match side {
                OptionSide::Call => norm_cdf(t.d1),
                OptionSide::Put => norm_cdf(t.d1) - 1.0,
            },
        };
        finite("delta", value)
    }

    /// Computes Gamma (∂²V/∂S²) = φ(d₁) / (S·σ·√T).
    ///
    /// Gamma is the same for both calls and puts.
    pub fn gamma(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => norm_pdf(t.d1) / (self.spot * self.volatility * t.sqrt_t),
        };
        finite("gamma", value)
    }

    /// Computes Vega (∂V/∂σ) = S·√T·φ(d₁), per unit of volatility.
    ///
    /// Vega is the same for both calls and puts.
    pub fn vega(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => self.spot * t.sqrt_t * norm_pdf(t.d1),
        };
        finite("vega", value)
    }

    /// Computes Theta (∂V/∂t) per year.
    ///
    /// - Call Theta = -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    pub fn theta(&self, strike: f64, expiry: f64, side: OptionSide) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => {
                let decay = -(self.spot * self.volatility * norm_pdf(t.d1)) / (2.0 * t.sqrt_t);
                match side {
                    OptionSide::Call => {
                        decay - self.rate * strike * t.discount * norm_cdf(t.d2)
                    }
                    OptionSide::Put => {
                        decay + self.rate * strike * t.discount * norm_cdf(-t.d2)
                    }
                }
            }
        };
        finite("theta", value)
    }

    /// Computes Rho (∂V/∂r) per unit of rate.
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self, strike: f64, expiry: f64, side: OptionSide) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => match side {
                OptionSide::Call => strike * expiry * t.discount * norm_cdf(t.d2),
                OptionSide::Put => -strike * expiry * t.discount * norm_cdf(-t.d2),
            },
        };
        finite("rho", value)
    }

    /// Computes Vanna (∂²V/∂S∂σ) = -φ(d₁)·d₂/σ.
    pub fn vanna(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => -norm_pdf(t.d1) * t.d2 / self.volatility,
        };
        finite("vanna", value)
    }

    /// Computes Volga (∂²V/∂σ²) = S·φ(d₁)·√T·d₁·d₂/σ.
    pub fn volga(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => self.spot * norm_pdf(t.d1) * t.sqrt_t * t.d1 * t.d2 / self.volatility,
        };
        finite("volga", value)
    }

    /// Computes Charm (∂Δ/∂t) per year, identical for calls and puts
    /// without dividends.
    ///
    /// Charm = -φ(d₁)·(2rT - d₂·σ√T) / (2T·σ√T)
    pub fn charm(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        let value = match self.terms(strike, expiry)? {
            None => 0.0,
            Some(t) => {
                let vol_sqrt_t = self.volatility * t.sqrt_t;
                -norm_pdf(t.d1) * (2.0 * self.rate * expiry - t.d2 * vol_sqrt_t)
                    / (2.0 * expiry * vol_sqrt_t)
            }
        };
        finite("charm", value)
    }
}

fn finite(what: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NumericalDegeneracy(format!(
            "{} evaluated to {}",
            what, value
        )))
    }
}
