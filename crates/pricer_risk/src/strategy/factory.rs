//! Name-based strategy construction.

use pricer_core::types::{OptionSide, PricingError};
use pricer_models::instruments::{Contract, OptionParams};
use pricer_models::models::ValuationModel;
use tracing::debug;

use super::{Strategy, StrategyKind};

/// Strike multipliers used when building from an anchor strike.
const WING_LOW: f64 = 0.95;
const WING_HIGH: f64 = 1.05;
const BODY_LOW: f64 = 0.98;
const BODY_HIGH: f64 = 1.02;

/// Market inputs shared by every leg of a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Underlying {
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Volatility.
    pub volatility: f64,
    /// Time to expiry in years.
    pub expiry: f64,
}

impl Underlying {
    /// Groups the market inputs. Validation happens when legs are built.
    pub fn new(spot: f64, rate: f64, volatility: f64, expiry: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            expiry,
        }
    }
}

type StrategyBuilder = fn(&StrategyFactory, &Underlying, f64, bool) -> Result<Strategy, PricingError>;

fn straddle(f: &StrategyFactory, u: &Underlying, anchor: f64, is_long: bool) -> Result<Strategy, PricingError> {
    f.straddle(u, anchor, is_long)
}

fn strangle(f: &StrategyFactory, u: &Underlying, anchor: f64, is_long: bool) -> Result<Strategy, PricingError> {
    f.strangle(u, WING_LOW * anchor, WING_HIGH * anchor, is_long)
}

fn bull_call(f: &StrategyFactory, u: &Underlying, anchor: f64, is_long: bool) -> Result<Strategy, PricingError> {
    f.bull_call_spread(u, anchor, WING_HIGH * anchor, is_long)
}

fn iron_condor(f: &StrategyFactory, u: &Underlying, anchor: f64, is_long: bool) -> Result<Strategy, PricingError> {
    f.iron_condor(
        u,
        WING_LOW * anchor,
        BODY_LOW * anchor,
        BODY_HIGH * anchor,
        WING_HIGH * anchor,
        is_long,
    )
}

/// Canonical names and their anchor-strike builders.
const STRATEGIES: &[(&str, StrategyBuilder)] = &[
    ("straddle", straddle),
    ("strangle", strangle),
    ("bull_call", bull_call),
    ("iron_condor", iron_condor),
];

/// Alternative names.
const ALIASES: &[(&str, &str)] = &[
    ("bull_call_spread", "bull_call"),
    ("vertical_spread", "bull_call"),
];

fn strictly_increasing(strikes: &[f64]) -> bool {
    strikes.windows(2).all(|w| w[0] < w[1])
}

/// Builds standard strategies. Every leg uses the factory's model.
///
/// `is_long = false` negates every conventional quantity.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
/// use pricer_risk::strategy::{StrategyFactory, StrategyKind, Underlying};
///
/// let factory = StrategyFactory::default();
/// let condor = factory.create("iron_condor", 100.0, 100.0, 0.05, 0.2, 1.0, true).unwrap();
/// assert_eq!(condor.kind(), StrategyKind::IronCondor);
/// assert_eq!(condor.len(), 4);
///
/// let u = Underlying::new(100.0, 0.05, 0.2, 1.0);
/// let err = factory.bull_call_spread(&u, 105.0, 100.0, true).unwrap_err();
/// assert!(matches!(err, PricingError::InvalidStrategyConfiguration(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrategyFactory {
    model: ValuationModel,
}

impl StrategyFactory {
    /// Factory whose legs use `model`.
    pub fn new(model: ValuationModel) -> Self {
        Self { model }
    }

    /// Model used for every leg.
    pub fn model(&self) -> ValuationModel {
        self.model
    }

    /// Canonical strategy names.
    pub fn available_strategies() -> Vec<&'static str> {
        STRATEGIES.iter().map(|(name, _)| *name).collect()
    }

    /// Builds the named strategy around the anchor strike.
    ///
    /// Names are matched case-insensitively; `bull_call_spread` and
    /// `vertical_spread` are aliases of `bull_call`.
    ///
    /// # Errors
    /// - `PricingError::UnknownStrategy` for unregistered names
    /// - `PricingError::InvalidParameter` for invalid market inputs or anchor
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        name: &str,
        spot: f64,
        anchor: f64,
        rate: f64,
        volatility: f64,
        expiry: f64,
        is_long: bool,
    ) -> Result<Strategy, PricingError> {
        let key = name.trim().to_lowercase();
        let canonical = ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map_or(key.as_str(), |(_, target)| *target);
        let builder = STRATEGIES
            .iter()
            .find(|(registered, _)| *registered == canonical)
            .map(|(_, builder)| *builder)
            .ok_or_else(|| PricingError::UnknownStrategy(name.to_string()))?;

        if !(anchor.is_finite() && anchor > 0.0) {
            return Err(PricingError::not_positive("anchor strike", anchor));
        }

        let underlying = Underlying::new(spot, rate, volatility, expiry);
        let strategy = builder(self, &underlying, anchor, is_long)?;
        debug!(
            strategy = %strategy.kind(),
            model = %self.model,
            legs = strategy.len(),
            anchor,
            is_long,
            net_premium = strategy.total_price(),
            "strategy created"
        );
        Ok(strategy)
    }

    /// Call and put at `strike`, +1/+1 when long.
    pub fn straddle(&self, u: &Underlying, strike: f64, is_long: bool) -> Result<Strategy, PricingError> {
        self.assemble(
            StrategyKind::Straddle,
            u,
            is_long,
            &[(strike, OptionSide::Call, 1), (strike, OptionSide::Put, 1)],
        )
    }

    /// Put at `put_strike`, call at `call_strike`, +1/+1 when long.
    ///
    /// # Errors
    /// `PricingError::InvalidStrategyConfiguration` unless
    /// `put_strike < call_strike`.
    pub fn strangle(
        &self,
        u: &Underlying,
        put_strike: f64,
        call_strike: f64,
        is_long: bool,
    ) -> Result<Strategy, PricingError> {
        if !strictly_increasing(&[put_strike, call_strike]) {
            return Err(PricingError::InvalidStrategyConfiguration(format!(
                "strangle needs put strike {} below call strike {}",
                put_strike, call_strike
            )));
        }
        self.assemble(
            StrategyKind::Strangle,
            u,
            is_long,
            &[(put_strike, OptionSide::Put, 1), (call_strike, OptionSide::Call, 1)],
        )
    }

    /// Long call at `lower`, short call at `upper`.
    ///
    /// # Errors
    /// `PricingError::InvalidStrategyConfiguration` unless `lower < upper`.
    pub fn bull_call_spread(
        &self,
        u: &Underlying,
        lower: f64,
        upper: f64,
        is_long: bool,
    ) -> Result<Strategy, PricingError> {
        if !strictly_increasing(&[lower, upper]) {
            return Err(PricingError::InvalidStrategyConfiguration(format!(
                "vertical spread needs K1 {} below K2 {}",
                lower, upper
            )));
        }
        self.assemble(
            StrategyKind::BullCall,
            u,
            is_long,
            &[(lower, OptionSide::Call, 1), (upper, OptionSide::Call, -1)],
        )
    }

    /// Long put, short put, short call, long call at increasing strikes.
    ///
    /// # Errors
    /// `PricingError::InvalidStrategyConfiguration` unless
    /// `long_put < short_put < short_call < long_call`.
    pub fn iron_condor(
        &self,
        u: &Underlying,
        long_put: f64,
        short_put: f64,
        short_call: f64,
        long_call: f64,
        is_long: bool,
    ) -> Result<Strategy, PricingError> {
        if !strictly_increasing(&[long_put, short_put, short_call, long_call]) {
            return Err(PricingError::InvalidStrategyConfiguration(format!(
                "iron condor strikes must be strictly increasing, got {}, {}, {}, {}",
                long_put, short_put, short_call, long_call
            )));
        }
        self.assemble(
            StrategyKind::IronCondor,
            u,
            is_long,
            &[
                (long_put, OptionSide::Put, 1),
                (short_put, OptionSide::Put, -1),
                (short_call, OptionSide::Call, -1),
                (long_call, OptionSide::Call, 1),
            ],
        )
    }

    fn assemble(
        &self,
        kind: StrategyKind,
        u: &Underlying,
        is_long: bool,
        legs: &[(f64, OptionSide, i64)],
    ) -> Result<Strategy, PricingError> {
        let sign = if is_long { 1 } else { -1 };
        let mut strategy = Strategy::new(kind);
        for &(strike, side, quantity) in legs {
            let params = OptionParams::new(u.spot, strike, u.rate, u.volatility, u.expiry, side)?;
            strategy.add_leg(Contract::new(params, self.model)?, sign * quantity)?;
        }
        Ok(strategy)
    }
}
