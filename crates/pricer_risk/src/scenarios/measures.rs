//! Empirical risk measures over scenario P&L.
//!
//! Losses are −P&L sorted ascending. For N scenarios and confidence c the
//! tail index is ⌈(1 − c)·N⌉ − 1:
//!
//! - VaR is the loss at the tail index, 0 when the index is negative (c = 1)
//! - ES is the mean of the losses up to and including the tail index; a
//!   negative index is clamped to 0

use pricer_core::types::PricingError;

/// Relative slack absorbing representation error in (1 − c)·N, so that
/// 0.95 over 100 scenarios selects index 4, not 5.
const INDEX_SLACK: f64 = 1e-9;

/// Scenario-based portfolio risk figures.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMeasures {
    /// Empirical Value-at-Risk.
    pub var: f64,
    /// Expected Shortfall: mean of the sorted losses up to VaR, inclusive.
    pub expected_shortfall: f64,
    /// Largest loss over all scenarios, floored at 0.
    pub max_loss: f64,
    /// Fraction of scenarios with strictly positive P&L.
    pub probability_of_profit: f64,
}

/// Checks that `confidence` is finite and in (0, 1].
pub fn validate_confidence(confidence: f64) -> Result<(), PricingError> {
    if confidence.is_finite() && confidence > 0.0 && confidence <= 1.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter(format!(
            "confidence must be in (0, 1], got {}",
            confidence
        )))
    }
}

/// Tail index ⌈(1 − c)·N⌉ − 1, `None` when negative.
///
/// # Examples
/// ```
/// use pricer_risk::scenarios::tail_index;
///
/// assert_eq!(tail_index(100, 0.95), Some(4));
/// assert_eq!(tail_index(10, 0.99), Some(0));
/// assert_eq!(tail_index(10, 1.0), None);
/// ```
pub fn tail_index(scenario_count: usize, confidence: f64) -> Option<usize> {
    let raw = (1.0 - confidence) * scenario_count as f64;
    let count = (raw - INDEX_SLACK * raw.abs().max(1.0)).ceil();
    if count < 1.0 {
        None
    } else {
        Some((count as usize - 1).min(scenario_count.saturating_sub(1)))
    }
}

impl RiskMeasures {
    /// Computes every measure from per-scenario P&L.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for an empty P&L set or a confidence
    /// outside (0, 1].
    ///
    /// # Examples
    /// ```
    /// use pricer_risk::scenarios::RiskMeasures;
    ///
    /// let pnl: Vec<f64> = (1..=10).map(|i| i as f64 - 6.0).collect(); // -5..=4
    /// let m = RiskMeasures::from_pnl(&pnl, 0.8).unwrap();
    /// assert_eq!(m.var, -3.0);                 // losses[1]
    /// assert_eq!(m.expected_shortfall, -3.5);  // mean of -4 and -3
    /// assert_eq!(m.max_loss, 5.0);
    /// assert_eq!(m.probability_of_profit, 0.4);
    /// ```
    pub fn from_pnl(pnl: &[f64], confidence: f64) -> Result<Self, PricingError> {
        validate_confidence(confidence)?;
        if pnl.is_empty() {
            return Err(PricingError::InvalidParameter(
                "scenario set must not be empty".to_string(),
            ));
        }

        let mut losses: Vec<f64> = pnl.iter().map(|p| -p).collect();
        losses.sort_by(f64::total_cmp);

        let index = tail_index(losses.len(), confidence);
        let var = index.map_or(0.0, |i| losses[i]);
        let tail = &losses[..=index.unwrap_or(0)];
        let expected_shortfall = tail.iter().sum::<f64>() / tail.len() as f64;

        let profitable = pnl.iter().filter(|&&p| p > 0.0).count();

        Ok(Self {
            var,
            expected_shortfall,
            max_loss: losses[losses.len() - 1].max(0.0),
            probability_of_profit: profitable as f64 / pnl.len() as f64,
        })
    }
}
