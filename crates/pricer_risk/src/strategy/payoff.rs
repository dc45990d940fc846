//! Expiry payoff analysis over a spot range.

use pricer_core::types::PricingError;

use super::Strategy;

/// Best and worst expiry P&L over a sampled spot range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiryExtremes {
    /// Largest expiry P&L.
    pub max_profit: f64,
    /// Largest expiry loss as a magnitude, floored at 0.
    pub max_loss: f64,
}

fn sample_grid(lower: f64, upper: f64, samples: usize) -> Result<Vec<f64>, PricingError> {
    if !(lower.is_finite() && lower > 0.0) {
        return Err(PricingError::not_positive("lower spot bound", lower));
    }
    if !(upper.is_finite() && upper > lower) {
        return Err(PricingError::InvalidParameter(format!(
            "upper spot bound {} must exceed lower bound {}",
            upper, lower
        )));
    }
    if samples < 2 {
        return Err(PricingError::InvalidParameter(
            "payoff analysis needs at least 2 samples".to_string(),
        ));
    }
    let step = (upper - lower) / (samples - 1) as f64;
    Ok((0..samples).map(|i| lower + step * i as f64).collect())
}

impl Strategy {
    /// (spot, expiry P&L) for each spot.
    pub fn payoff_curve(&self, spots: &[f64]) -> Vec<(f64, f64)> {
        spots.iter().map(|&s| (s, self.payoff(s))).collect()
    }

    /// Spots in `[lower, upper]` where the expiry P&L crosses zero.
    ///
    /// The range is sampled at `samples` evenly spaced points and each sign
    /// change is located by linear interpolation, which is exact on the
    /// piecewise-linear payoff whenever no strike lies between two samples.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` unless `0 < lower < upper` and
    /// `samples >= 2`.
    pub fn breakevens(&self, lower: f64, upper: f64, samples: usize) -> Result<Vec<f64>, PricingError> {
        let curve = self.payoff_curve(&sample_grid(lower, upper, samples)?);
        let mut crossings = Vec::new();

        for (i, &(spot, pnl)) in curve.iter().enumerate() {
            if pnl == 0.0 {
                crossings.push(spot);
                continue;
            }
            if let Some(&(next_spot, next_pnl)) = curve.get(i + 1) {
                if next_pnl != 0.0 && pnl.signum() != next_pnl.signum() {
                    crossings.push(spot + (next_spot - spot) * pnl / (pnl - next_pnl));
                }
            }
        }
        Ok(crossings)
    }

    /// Maximum profit and maximum loss over `[lower, upper]`.
    ///
    /// # Errors
    /// As [`Strategy::breakevens`].
    pub fn expiry_extremes(&self, lower: f64, upper: f64, samples: usize) -> Result<ExpiryExtremes, PricingError> {
        let grid = sample_grid(lower, upper, samples)?;
        let (min, max) = grid
            .iter()
            .map(|&s| self.payoff(s))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Ok(ExpiryExtremes {
            max_profit: max,
            max_loss: (-min).max(0.0),
        })
    }
}
