//! Spot scenario sets.
//!
//! A scenario set resolves to an ordered list of strictly positive spots:
//! caller-supplied, a linear grid around the reference spot, or lognormal
//! draws over a short horizon.

use pricer_core::types::PricingError;
use pricer_models::instruments::Contract;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Linear grid of spots as multiples of the reference spot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Lowest multiple of the reference spot.
    pub lower: f64,
    /// Highest multiple of the reference spot.
    pub upper: f64,
    /// Number of grid points, endpoints included.
    pub points: usize,
}

impl Default for GridConfig {
    /// 0.8S to 1.2S over 101 points.
    fn default() -> Self {
        Self {
            lower: 0.8,
            upper: 1.2,
            points: 101,
        }
    }
}

impl GridConfig {
    /// Checks `0 < lower < upper` and `points >= 2`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.lower.is_finite() && self.lower > 0.0) {
            return Err(PricingError::not_positive("grid lower bound", self.lower));
        }
        if !(self.upper.is_finite() && self.upper > self.lower) {
            return Err(PricingError::InvalidParameter(format!(
                "grid upper bound {} must exceed lower bound {}",
                self.upper, self.lower
            )));
        }
        if self.points < 2 {
            return Err(PricingError::InvalidParameter(
                "grid needs at least 2 points".to_string(),
            ));
        }
        Ok(())
    }

    /// Grid spots around `reference`.
    pub fn spots(&self, reference: f64) -> Result<Vec<f64>, PricingError> {
        self.validate()?;
        let step = (self.upper - self.lower) / (self.points - 1) as f64;
        Ok((0..self.points)
            .map(|i| reference * (self.lower + step * i as f64))
            .collect())
    }
}

/// Lognormal spot draws S·exp((r − σ²/2)h + σ√h·Z).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LognormalConfig {
    /// Horizon h in years.
    pub horizon: f64,
    /// Number of draws.
    pub paths: usize,
    /// RNG seed; equal seeds give equal scenario sets.
    pub seed: u64,
}

impl Default for LognormalConfig {
    /// One trading day, 1000 draws, seed 42.
    fn default() -> Self {
        Self {
            horizon: 1.0 / 252.0,
            paths: 1000,
            seed: 42,
        }
    }
}

impl LognormalConfig {
    /// Checks a positive finite horizon and at least one path.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(PricingError::not_positive("horizon", self.horizon));
        }
        if self.paths == 0 {
            return Err(PricingError::InvalidParameter(
                "lognormal sampler needs at least 1 path".to_string(),
            ));
        }
        Ok(())
    }

    /// Draws spots from `reference` with the given drift rate and volatility.
    pub fn spots(&self, reference: f64, rate: f64, volatility: f64) -> Result<Vec<f64>, PricingError> {
        self.validate()?;

        let drift = (rate - 0.5 * volatility * volatility) * self.horizon;
        let diffusion = volatility * self.horizon.sqrt();
        let mut rng = StdRng::seed_from_u64(self.seed);

        Ok((0..self.paths)
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut rng);
                reference * (drift + diffusion * z).exp()
            })
            .collect())
    }
}

/// Source of scenario spots for the risk engine.
///
/// # Examples
/// ```
/// use pricer_risk::scenarios::{GridConfig, ScenarioSet};
///
/// let grid = ScenarioSet::LinearGrid(GridConfig { lower: 0.9, upper: 1.1, points: 3 });
/// let spots = grid.resolve_around(100.0, 0.0, 0.2).unwrap();
/// assert_eq!(spots.len(), 3);
/// assert!((spots[2] - 110.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ScenarioSet {
    /// Caller-supplied spots.
    Explicit {
        /// Scenario spots, used as given.
        spots: Vec<f64>,
    },
    /// Linear grid around the reference spot.
    LinearGrid(GridConfig),
    /// Lognormal draws from the reference spot.
    Lognormal(LognormalConfig),
}

impl Default for ScenarioSet {
    fn default() -> Self {
        ScenarioSet::LinearGrid(GridConfig::default())
    }
}

impl ScenarioSet {
    /// Explicit scenario set.
    pub fn explicit(spots: impl Into<Vec<f64>>) -> Self {
        ScenarioSet::Explicit {
            spots: spots.into(),
        }
    }

    /// True when the spots depend on a reference contract.
    pub fn is_generated(&self) -> bool {
        !matches!(self, ScenarioSet::Explicit { .. })
    }

    /// Resolves spots around an explicit reference spot, rate and volatility.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for an empty set, a non-positive or
    /// non-finite spot, or invalid generator settings.
    pub fn resolve_around(&self, spot: f64, rate: f64, volatility: f64) -> Result<Vec<f64>, PricingError> {
        let spots = match self {
            ScenarioSet::Explicit { spots } => spots.clone(),
            ScenarioSet::LinearGrid(grid) => grid.spots(spot)?,
            ScenarioSet::Lognormal(lognormal) => lognormal.spots(spot, rate, volatility)?,
        };
        validate_spots(&spots)?;
        Ok(spots)
    }

    /// Resolves spots using `reference` (normally the first position) for
    /// generated sets.
    ///
    /// # Errors
    /// As [`ScenarioSet::resolve_around`], plus `InvalidParameter` when a
    /// generated set has no reference contract.
    pub fn resolve(&self, reference: Option<&Contract>) -> Result<Vec<f64>, PricingError> {
        let spots = match (self, reference) {
            (ScenarioSet::Explicit { spots }, _) => spots.clone(),
            (ScenarioSet::LinearGrid(grid), Some(contract)) => grid.spots(contract.spot())?,
            (ScenarioSet::Lognormal(lognormal), Some(contract)) => {
                lognormal.spots(contract.spot(), contract.rate(), contract.volatility())?
            }
            (_, None) => {
                return Err(PricingError::InvalidParameter(
                    "generated scenario sets need a non-empty portfolio".to_string(),
                ))
            }
        };
        validate_spots(&spots)?;
        Ok(spots)
    }
}

fn validate_spots(spots: &[f64]) -> Result<(), PricingError> {
    if spots.is_empty() {
        return Err(PricingError::InvalidParameter(
            "scenario set must not be empty".to_string(),
        ));
    }
    match spots.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
        Some(&bad) => Err(PricingError::not_positive("scenario spot", bad)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::create_contract;

    #[test]
    fn test_default_grid() {
        let spots = ScenarioSet::default().resolve_around(100.0, 0.05, 0.2).unwrap();
        assert_eq!(spots.len(), 101);
        assert_relative_eq!(spots[0], 80.0, epsilon = 1e-12);
        assert_relative_eq!(spots[50], 100.0, epsilon = 1e-12);
        assert_relative_eq!(spots[100], 120.0, epsilon = 1e-12);
        assert!(spots.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_invalid_grid() {
        let bad = [
            GridConfig { lower: 0.0, upper: 1.2, points: 10 },
            GridConfig { lower: 1.2, upper: 0.8, points: 10 },
            GridConfig { lower: 0.8, upper: 1.2, points: 1 },
        ];
        for grid in bad {
            assert!(matches!(
                ScenarioSet::LinearGrid(grid).resolve_around(100.0, 0.0, 0.2),
                Err(PricingError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_lognormal_is_seeded() {
        let set = ScenarioSet::Lognormal(LognormalConfig { horizon: 0.25, paths: 500, seed: 7 });
        let a = set.resolve_around(100.0, 0.05, 0.3).unwrap();
        let b = set.resolve_around(100.0, 0.05, 0.3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
        assert!(a.iter().all(|&s| s > 0.0));

        let other = ScenarioSet::Lognormal(LognormalConfig { horizon: 0.25, paths: 500, seed: 8 })
            .resolve_around(100.0, 0.05, 0.3)
            .unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_lognormal_mean_is_forward() {
        let config = LognormalConfig { horizon: 1.0, paths: 20_000, seed: 11 };
        let spots = config.spots(100.0, 0.05, 0.2).unwrap();
        let mean = spots.iter().sum::<f64>() / spots.len() as f64;
        // E[S_h] = S·e^(rh) ≈ 105.13; standard error ≈ 0.15
        assert_relative_eq!(mean, 100.0 * 0.05_f64.exp(), epsilon = 0.75);
    }

    #[test]
    fn test_explicit_validation() {
        assert!(matches!(
            ScenarioSet::explicit(Vec::new()).resolve(None),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            ScenarioSet::explicit(vec![100.0, -1.0]).resolve(None),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            ScenarioSet::explicit(vec![100.0, f64::INFINITY]).resolve(None),
            Err(PricingError::InvalidParameter(_))
        ));
        assert_eq!(
            ScenarioSet::explicit(vec![90.0, 110.0]).resolve(None).unwrap(),
            vec![90.0, 110.0]
        );
    }

    #[test]
    fn test_generated_sets_need_reference() {
        assert!(ScenarioSet::default().is_generated());
        assert!(matches!(
            ScenarioSet::default().resolve(None),
            Err(PricingError::InvalidParameter(_))
        ));

        let contract = create_contract("european", 50.0, 50.0, 0.0, 0.2, 1.0, "call", None).unwrap();
        let spots = ScenarioSet::default().resolve(Some(&contract)).unwrap();
        assert_relative_eq!(spots[0], 40.0, epsilon = 1e-12);
    }
}
