//! Validated option parameters.

use pricer_core::types::{OptionSide, PricingError};

/// Spot, strike, rate, volatility, expiry and side of a vanilla option.
///
/// Spot, strike and volatility are strictly positive, expiry is
/// non-negative and the rate is any finite number. Every constructor and
/// `with_*` helper re-validates, so an `OptionParams` value is always
/// evaluable.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::OptionParams;
///
/// let params = OptionParams::new(100.0, 95.0, 0.05, 0.2, 0.5, OptionSide::Call).unwrap();
/// assert_eq!(params.strike(), 95.0);
/// assert_eq!(params.intrinsic(), 5.0);
///
/// let bumped = params.with_spot(101.0).unwrap();
/// assert_eq!(bumped.spot(), 101.0);
/// assert_eq!(params.spot(), 100.0);
///
/// assert!(OptionParams::new(100.0, 95.0, 0.05, 0.2, -1.0, OptionSide::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParams {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    side: OptionSide,
}

fn positive(name: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::not_positive(name, value))
    }
}

impl OptionParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if spot, strike or volatility is not
    /// strictly positive, expiry is negative, or any value is not finite.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
        side: OptionSide,
    ) -> Result<Self, PricingError> {
        let params = Self {
            spot: positive("spot", spot)?,
            strike: positive("strike", strike)?,
            rate,
            volatility: positive("volatility", volatility)?,
            expiry,
            side,
        };
        params.with_rate(rate)?.with_expiry(expiry)
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
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

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the option side.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// True at the expiry boundary (T = 0).
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expiry <= 0.0
    }

    /// Immediate-exercise value at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.side.intrinsic(self.spot, self.strike)
    }

    /// Delta of the intrinsic payoff: call 1 if S > K else 0, put -1 if S < K else 0.
    pub fn expiry_delta(&self) -> f64 {
        match self.side {
            OptionSide::Call if self.spot > self.strike => 1.0,
            OptionSide::Put if self.spot < self.strike => -1.0,
            _ => 0.0,
        }
    }

    /// Copy with a new spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Ok(Self {
            spot: positive("spot", spot)?,
            ..*self
        })
    }

    /// Copy with a new volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Ok(Self {
            volatility: positive("volatility", volatility)?,
            ..*self
        })
    }

    /// Copy with a new rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, PricingError> {
        if !rate.is_finite() {
            return Err(PricingError::InvalidParameter(format!(
                "rate must be finite, got {}",
                rate
            )));
        }
        Ok(Self { rate, ..*self })
    }

    /// Copy with a new time to expiry.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self, PricingError> {
        if !(expiry.is_finite() && expiry >= 0.0) {
            return Err(PricingError::InvalidParameter(format!(
                "time to expiry must be non-negative and finite, got {}",
                expiry
            )));
        }
        Ok(Self { expiry, ..*self })
    }
}
