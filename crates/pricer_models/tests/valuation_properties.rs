//! Pricing properties that must hold for every valid contract.
//!
//! # Test Categories
//!
//! 1. **Reference values**: textbook S=K=100, r=5%, σ=20%, T=1 case
//! 2. **Closed-form identities**: parity, delta symmetry, gamma/vega sign
//! 3. **Monotonicity**: in spot, strike and rate
//! 4. **Lattice vs closed form**: early-exercise premium, convergence
//! 5. **Expiry boundary**: intrinsic values near and at T = 0

use approx::assert_relative_eq;
use pricer_core::traits::Valuation;
use pricer_core::types::{OptionSide, PricingError};
use pricer_models::instruments::{create_contract, Contract, ModelFactory, OptionParams};
use proptest::prelude::*;

fn european(s: f64, k: f64, r: f64, v: f64, t: f64, side: &str) -> Contract {
    create_contract("european", s, k, r, v, t, side, None).unwrap()
}

fn american(s: f64, k: f64, r: f64, v: f64, t: f64, side: &str, steps: usize) -> Contract {
    create_contract("american", s, k, r, v, t, side, Some(steps)).unwrap()
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn test_reference_case() {
    let call = european(100.0, 100.0, 0.05, 0.2, 1.0, "call");
    let put = european(100.0, 100.0, 0.05, 0.2, 1.0, "put");
    assert_relative_eq!(call.price().unwrap(), 10.45, epsilon = 0.05);
    assert_relative_eq!(put.price().unwrap(), 5.57, epsilon = 0.05);
}

#[test]
fn test_reference_case_american_put_premium() {
    let european_put = european(100.0, 100.0, 0.05, 0.2, 1.0, "put").price().unwrap();
    let american_put = american(100.0, 100.0, 0.05, 0.2, 1.0, "put", 100).price().unwrap();
    assert!(american_put > european_put);
    assert_relative_eq!(american_put, 6.08, epsilon = 0.02);
}

#[test]
fn test_default_lattice_steps() {
    let default = create_contract("american", 100.0, 100.0, 0.05, 0.2, 1.0, "put", None).unwrap();
    let explicit = american(100.0, 100.0, 0.05, 0.2, 1.0, "put", 100);
    assert_eq!(default.price().unwrap(), explicit.price().unwrap());
}

// ============================================================================
// Expiry boundary
// ============================================================================

#[test]
fn test_expired_contracts_are_intrinsic_under_both_models() {
    for model in ["european", "american"] {
        let call = create_contract(model, 110.0, 100.0, 0.05, 0.2, 0.0, "call", None).unwrap();
        let put = create_contract(model, 110.0, 100.0, 0.05, 0.2, 0.0, "put", None).unwrap();
        assert_eq!(call.price().unwrap(), 10.0);
        assert_eq!(put.price().unwrap(), 0.0);
        assert_eq!(call.delta().unwrap(), 1.0);
        assert_eq!(put.delta().unwrap(), 0.0);
        assert_eq!(call.gamma().unwrap(), 0.0);
        assert_eq!(put.vega().unwrap(), 0.0);
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_contracts() {
    let invalid = [
        create_contract("european", 0.0, 100.0, 0.05, 0.2, 1.0, "call", None),
        create_contract("european", 100.0, 0.0, 0.05, 0.2, 1.0, "call", None),
        create_contract("european", 100.0, 100.0, 0.05, 0.0, 1.0, "call", None),
        create_contract("european", 100.0, 100.0, 0.05, 0.2, -0.5, "call", None),
        create_contract("european", 100.0, 100.0, 0.05, 0.2, 1.0, "digital", None),
    ];
    for result in invalid {
        assert!(matches!(result, Err(PricingError::InvalidParameter(_))));
    }
}

#[test]
fn test_unknown_model() {
    let params = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Call).unwrap();
    assert!(matches!(
        ModelFactory::create("heston", params, None),
        Err(PricingError::UnknownModel(_))
    ));
}

#[test]
fn test_lattice_degeneracy_is_an_evaluation_error() {
    // σ√dt < r·dt: e^(r dt) exceeds the up factor
    let contract = american(100.0, 100.0, 0.5, 0.01, 1.0, "put", 1);
    assert!(matches!(
        contract.price(),
        Err(PricingError::NumericalDegeneracy(_))
    ));
}

#[test]
fn test_wide_lattice_keeps_put_above_european() {
    // σ·√(T·N) ≈ 849: the top of the tree overflows to +inf
    let european_put = european(100.0, 100.0, 0.05, 4.9, 30.0, "put").price().unwrap();
    let american_put = american(100.0, 100.0, 0.05, 4.9, 30.0, "put", 1000).price().unwrap();
    assert!(american_put.is_finite());
    assert!(american_put >= european_put);
    assert!(american_put <= 100.0);

    // an infinite call payoff is reported, not returned
    let call = american(100.0, 100.0, 0.05, 4.9, 30.0, "call", 1000);
    assert!(matches!(
        call.price(),
        Err(PricingError::NumericalDegeneracy(_))
    ));
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Put-call parity: C - P = S - K·e^(-rT).
    #[test]
    fn prop_put_call_parity(
        s in 10.0f64..500.0,
        k in 10.0f64..500.0,
        r in -0.05f64..0.2,
        v in 0.05f64..1.5,
        t in 0.01f64..5.0,
    ) {
        let call = european(s, k, r, v, t, "call").price().unwrap();
        let put = european(s, k, r, v, t, "put").price().unwrap();
        let forward = s - k * (-r * t).exp();
        prop_assert!((call - put - forward).abs() < 0.01, "C={} P={} S-Ke^-rT={}", call, put, forward);
    }

    /// Delta symmetry, gamma equality and positivity, vega positivity.
    #[test]
    fn prop_closed_form_greeks(
        s in 20.0f64..300.0,
        m in 0.7f64..1.4,
        r in -0.02f64..0.1,
        v in 0.1f64..1.5,
        t in 0.1f64..3.0,
    ) {
        let k = s * m;
        let call = european(s, k, r, v, t, "call");
        let put = european(s, k, r, v, t, "put");

        prop_assert!((call.delta().unwrap() - put.delta().unwrap() - 1.0).abs() < 0.01);

        let gamma_call = call.gamma().unwrap();
        let gamma_put = put.gamma().unwrap();
        prop_assert!(gamma_call > 0.0);
        prop_assert!((gamma_call - gamma_put).abs() < 1e-12);

        prop_assert!(call.vega().unwrap() > 0.0);
        prop_assert!(put.vega().unwrap() > 0.0);
    }

    /// Call increases in S and r; put increases in K.
    #[test]
    fn prop_monotonicity(
        s in 20.0f64..300.0,
        m in 0.7f64..1.4,
        r in 0.0f64..0.1,
        v in 0.1f64..1.0,
        t in 0.1f64..3.0,
    ) {
        let k = s * m;
        let call = european(s, k, r, v, t, "call").price().unwrap();

        let higher_spot = european(s * 1.01, k, r, v, t, "call").price().unwrap();
        prop_assert!(higher_spot > call);

        let higher_rate = european(s, k, r + 0.01, v, t, "call").price().unwrap();
        prop_assert!(higher_rate > call);

        let put = european(s, k, r, v, t, "put").price().unwrap();
        let higher_strike = european(s, k * 1.01, r, v, t, "put").price().unwrap();
        prop_assert!(higher_strike > put);
    }

    /// American ≥ European up to the lattice discretisation error, which
    /// scales with S·σ·√T / N.
    #[test]
    fn prop_american_dominates_european(
        s in 20.0f64..300.0,
        m in 0.7f64..1.4,
        r in 0.0f64..0.1,
        v in 0.1f64..0.8,
        t in 0.1f64..2.0,
        is_call in any::<bool>(),
    ) {
        let steps = 100;
        let side = if is_call { "call" } else { "put" };
        let k = s * m;
        let euro = european(s, k, r, v, t, side).price().unwrap();
        let amer = american(s, k, r, v, t, side, steps).price().unwrap();
        let tolerance = 0.5 * s * v * t.sqrt() / steps as f64;
        prop_assert!(amer >= euro - tolerance, "american {} < european {} - {}", amer, euro, tolerance);
    }

    /// As T → 0 the call converges to max(S - K, 0).
    #[test]
    fn prop_near_expiry_call_is_intrinsic(
        s in 10.0f64..200.0,
        k in 10.0f64..200.0,
        r in -0.05f64..0.2,
        v in 0.05f64..1.0,
    ) {
        let call = european(s, k, r, v, 1e-6, "call").price().unwrap();
        prop_assert!((call - (s - k).max(0.0)).abs() < 0.1);
    }

    /// Moving the spot never changes any other field.
    #[test]
    fn prop_set_spot_only_moves_spot(s in 10.0f64..200.0, new_spot in 10.0f64..200.0) {
        let mut contract = american(s, 100.0, 0.03, 0.25, 0.5, "put", 20);
        let before = contract;
        contract.set_spot(new_spot).unwrap();
        prop_assert_eq!(contract.spot(), new_spot);
        prop_assert_eq!(contract.strike(), before.strike());
        prop_assert_eq!(contract.volatility(), before.volatility());
        prop_assert_eq!(contract.model(), before.model());
    }
}
