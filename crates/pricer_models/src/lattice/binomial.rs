//! Cox-Ross-Rubinstein recombining binomial lattice.
//!
//! Node (i, j) sits at layer i (time i·dt) with j down-moves, so its spot is
//! S·u^(i−2j). Backward induction runs over a single reusable layer buffer of
//! length N + 1; node j of layer i is overwritten after both of its children
//! in layer i + 1 have been read.

use pricer_core::types::{OptionSide, PricingError};
use tracing::warn;

/// Recombining CRR lattice parameters for one (T, σ, r, N) combination.
///
/// The spot is not part of the lattice: the same u, d, p roll back any
/// starting spot, which is what the lattice delta relies on.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::lattice::BinomialLattice;
///
/// let lattice = BinomialLattice::new(100, 1.0, 0.2, 0.05).unwrap();
/// let put = lattice.price(100.0, 100.0, OptionSide::Put);
/// assert!(put > 6.0 && put < 6.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialLattice {
    steps: usize,
    dt: f64,
    log_up: f64,
    up: f64,
    down: f64,
    prob: f64,
    discount: f64,
}

impl BinomialLattice {
    /// Builds the lattice for `steps` layers over `expiry` years.
    ///
    /// # Errors
    /// - `PricingError::InvalidParameter` if `steps == 0`, `expiry <= 0`
    ///   or `volatility <= 0`
    /// - `PricingError::NumericalDegeneracy` if the risk-neutral probability
    ///   is not strictly inside (0, 1)
    pub fn new(steps: usize, expiry: f64, volatility: f64, rate: f64) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::InvalidParameter(
                "lattice steps must be >= 1".to_string(),
            ));
        }
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(PricingError::not_positive("lattice expiry", expiry));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::not_positive("volatility", volatility));
        }

        let dt = expiry / steps as f64;
        let log_up = volatility * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        let prob = ((rate * dt).exp() - down) / (up - down);

        if !(prob > 0.0 && prob < 1.0) {
            warn!(steps, expiry, volatility, rate, prob, "degenerate binomial lattice");
            return Err(PricingError::NumericalDegeneracy(format!(
                "risk-neutral probability {} outside (0, 1) for σ={}, r={}, dt={}",
                prob, volatility, rate, dt
            )));
        }

        Ok(Self {
            steps,
            dt,
            log_up,
            up,
            down,
            prob,
            discount: (-rate * dt).exp(),
        })
    }

    /// Number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step length T/N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Up factor u = e^(σ√dt).
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down factor d = 1/u.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Risk-neutral up probability p.
    #[inline]
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Prices an American option starting from `spot`, allocating a fresh
    /// layer buffer.
    pub fn price(&self, spot: f64, strike: f64, side: OptionSide) -> f64 {
        let mut values = vec![0.0; self.steps + 1];
        self.rollback(&mut values, spot, strike, side)
    }

    /// Spot at node (i, j), exponentiated per node so that an overflowing
    /// top of the tree leaves the lower nodes exact.
    #[inline]
    fn node_spot(&self, spot: f64, layer: usize, downs: usize) -> f64 {
        spot * (self.log_up * (layer as f64 - 2.0 * downs as f64)).exp()
    }

    /// Backward induction with early exercise into a caller-owned buffer.
    ///
    /// `values` is resized to N + 1 if needed; on return `values[0]` holds
    /// the root value, which is also returned.
    pub fn rollback(&self, values: &mut Vec<f64>, spot: f64, strike: f64, side: OptionSide) -> f64 {
        let n = self.steps;
        values.resize(n + 1, 0.0);

        let one_minus_p = 1.0 - self.prob;

        // Terminal layer: S·u^(N−2j)
        for (j, value) in values.iter_mut().enumerate() {
            *value = side.intrinsic(self.node_spot(spot, n, j), strike);
        }

        for i in (0..n).rev() {
            for j in 0..=i {
                let continuation =
                    self.discount * (self.prob * values[j] + one_minus_p * values[j + 1]);
                values[j] = continuation.max(side.intrinsic(self.node_spot(spot, i, j), strike));
            }
        }

        values[0]
    }
}
