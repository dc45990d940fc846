//! # Pricer Risk (L3: Application)
//!
//! Multi-leg strategies and scenario-based portfolio risk.
//!
//! This crate provides:
//! - [`Strategy`] and [`Leg`]: owned contracts with frozen entry premiums,
//!   quantity-weighted price and Greek aggregation, expiry payoff analysis
//! - [`StrategyFactory`]: straddle, strangle, bull call spread and iron
//!   condor by name or from explicit strikes
//! - [`RiskEngine`]: revalues read-only positions over a [`ScenarioSet`]
//!   and reports VaR, Expected Shortfall, maximum loss and probability of
//!   profit alongside the portfolio Greeks
//! - Rayon-based parallel scenario sweeps
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L3)             │
//! ├─────────────────────────────────────────┤
//! │  strategy/   - Strategy, Leg, factory   │
//! │  scenarios/  - sets, engine, measures   │
//! │  parallel/   - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes, CRR lattice, Contract   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_risk::{RiskEngine, ScenarioSet, StrategyFactory};
//!
//! let straddle = StrategyFactory::default()
//!     .create("straddle", 100.0, 100.0, 0.05, 0.2, 1.0, true)
//!     .unwrap();
//!
//! let result = RiskEngine::default()
//!     .evaluate_strategy(&straddle, 0.95, &ScenarioSet::default())
//!     .unwrap();
//!
//! assert_eq!(result.scenario_count, 101);
//! assert!(result.expected_shortfall <= result.var);
//! assert!(result.var <= result.max_loss);
//! // long straddle at the money is close to delta neutral
//! assert!(result.delta.abs() < 0.3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod scenarios;
pub mod strategy;

// Re-export commonly used types
pub use parallel::{ParallelConfig, DEFAULT_BATCH_SIZE};
pub use scenarios::{
    GridConfig, LognormalConfig, PnlBasis, Position, RiskConfig, RiskEngine, RiskMeasures,
    RiskResult, ScenarioSet,
};
pub use strategy::{ExpiryExtremes, Leg, LegSummary, Strategy, StrategyFactory, StrategyKind, Underlying};
