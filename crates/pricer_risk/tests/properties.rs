//! Invariants that hold across every pricer family.

mod common;

use approx::assert_relative_eq;
use pricer_core::market_data::curves::FlatCurve;
use pricer_core::market_data::snapshot::{CurveMarketSnapshot, DiscountFactorSnapshot};
use pricer_core::market_data::surfaces::FxVolatilitySurface;
use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::Currency;
use pricer_models::instruments::fx::{
    Barrier, BarrierDirection, FxAmericanOption, FxBarrierOption, FxDigitalOption, FxOptionContract,
    FxOptionTerms, FxOptionType, FxVanillaOption, KnockType, PayLeg, PositionSide,
};
use pricer_risk::{
    FiniteDifferenceConfig, FxAmericanOptionPricer, FxBarrierOptionPricer, FxDigitalOptionPricer,
    FxOptionEngine, FxOptionPricer, FxVanillaOptionPricer, GreekKind, QuoteConvention,
};
use proptest::prelude::*;

use common::{book, eurusd, eurusd_market, init_tracing, terms};

fn option_type(is_call: bool) -> FxOptionType {
    if is_call {
        FxOptionType::Call
    } else {
        FxOptionType::Put
    }
}

fn side(is_long: bool) -> PositionSide {
    if is_long {
        PositionSide::Long
    } else {
        PositionSide::Short
    }
}

// ============================================================================
// Exposure conservation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_exposure_converts_back_to_present_value(
        spot in 0.95_f64..1.25,
        strike in 0.95_f64..1.25,
        is_call in any::<bool>(),
        is_long in any::<bool>(),
    ) {
        let market = eurusd_market(spot, 0.03, 0.045);
        let engine = FxOptionEngine::default();
        for contract in book(strike, option_type(is_call), side(is_long)) {
            let pv = engine.present_value(&contract, &market).unwrap();
            let exposure = engine.currency_exposure(&contract, &market).unwrap();
            let rate = market
                .spot_rate(exposure.foreign.currency(), exposure.domestic.currency())
                .unwrap();
            let total = exposure.total_in_domestic(rate);
            prop_assert_eq!(total.currency(), pv.currency());
            prop_assert!(
                (total.amount() - pv.amount()).abs() <= 1e-9 * pv.amount().abs().max(1.0),
                "{}: {} vs {}", contract.family(), total.amount(), pv.amount()
            );
        }
    }
}

// ============================================================================
// Quote direction
// ============================================================================

fn assert_quote_symmetry<P: FxOptionPricer>(pricer: &P, option: &P::Contract, market: &CurveMarketSnapshot) {
    let spot = pricer.forward_rates(option, market).unwrap().spot;
    let delta = pricer.delta(option, market, true).unwrap();
    let delta_rev = pricer.delta(option, market, false).unwrap();
    assert_eq!(delta_rev.convention.quote, QuoteConvention::Reciprocal);
    assert_relative_eq!(delta_rev.value, -delta.value * spot * spot, max_relative = 1e-12);

    let gamma = pricer.gamma(option, market, true).unwrap();
    let gamma_rev = pricer.gamma(option, market, false).unwrap();
    let expected = (gamma.value * spot + 2.0 * delta.value) * spot.powi(3);
    assert_relative_eq!(gamma_rev.value, expected, epsilon = 1e-12, max_relative = 1e-10);

    let vanna = pricer.vanna(option, market, true).unwrap();
    let vanna_rev = pricer.vanna(option, market, false).unwrap();
    assert_eq!(vanna_rev.convention.quote, QuoteConvention::Reciprocal);
    assert_relative_eq!(vanna_rev.value, -vanna.value * spot * spot, epsilon = 1e-12, max_relative = 1e-12);
}

#[test]
fn test_reciprocal_quote_identities_for_every_family() {
    init_tracing();
    let market = eurusd_market(1.12, 0.03, 0.045);
    let config = FiniteDifferenceConfig::default();
    for kind in [FxOptionType::Call, FxOptionType::Put] {
        let t = terms(1.1, kind, PositionSide::Long);
        assert_quote_symmetry(&FxVanillaOptionPricer::new(), &FxVanillaOption::new(t), &market);
        assert_quote_symmetry(&FxAmericanOptionPricer::new(config), &FxAmericanOption::new(t), &market);
        for leg in [PayLeg::Domestic, PayLeg::Foreign] {
            assert_quote_symmetry(&FxDigitalOptionPricer::new(), &FxDigitalOption::new(t, leg), &market);
        }
        let barrier = Barrier::new(1.3, BarrierDirection::Up, KnockType::In).unwrap();
        let option = FxBarrierOption::new(FxVanillaOption::new(t), barrier, 0.0).unwrap();
        assert_quote_symmetry(&FxBarrierOptionPricer::new(config), &option, &market);
    }
}

// ============================================================================
// Limits and parities
// ============================================================================

#[test]
fn test_digital_call_and_put_sum_to_discounted_amount() {
    let market = eurusd_market(1.1, 0.03, 0.045);
    let pricer = FxDigitalOptionPricer::new();
    for leg in [PayLeg::Domestic, PayLeg::Foreign] {
        let call = FxDigitalOption::new(terms(1.15, FxOptionType::Call, PositionSide::Long), leg);
        let put = FxDigitalOption::new(terms(1.15, FxOptionType::Put, PositionSide::Long), leg);
        let sum = pricer.present_value(&call, &market).unwrap().amount()
            + pricer.present_value(&put, &market).unwrap().amount();
        let df = market.discount_factor(call.pay_currency(), 0.76).unwrap();
        assert_relative_eq!(sum, call.payout_amount() * df, max_relative = 1e-12);
    }
}

#[test]
fn test_vanilla_tends_to_discounted_intrinsic_at_zero_vol() {
    let market = eurusd_market(1.1, 0.03, 0.045).with_surface(FxVolatilitySurface::flat(1e-7));
    let pricer = FxVanillaOptionPricer::new();
    let forward = market.spot_rate(Currency::EUR, Currency::USD).unwrap()
        * market.discount_factor(Currency::EUR, 0.76).unwrap()
        / market.discount_factor(Currency::USD, 0.76).unwrap();
    let df = market.discount_factor(Currency::USD, 0.76).unwrap();
    for (strike, kind) in [(1.05, FxOptionType::Call), (1.15, FxOptionType::Put), (1.15, FxOptionType::Call)] {
        let option = FxVanillaOption::new(terms(strike, kind, PositionSide::Long));
        let pv = pricer.present_value(&option, &market).unwrap().amount();
        let intrinsic = (kind.omega() * (forward - strike)).max(0.0) * df * 2_500_000.0;
        assert_relative_eq!(pv, intrinsic, epsilon = 1e-6, max_relative = 1e-9);
    }
}

#[test]
fn test_barrier_in_out_parity() {
    let market = eurusd_market(1.1, 0.03, 0.045);
    let pricer = FxBarrierOptionPricer::default();
    for kind in [FxOptionType::Call, FxOptionType::Put] {
        let vanilla = FxVanillaOption::new(terms(1.08, kind, PositionSide::Short));
        let european = FxVanillaOptionPricer::new().present_value(&vanilla, &market).unwrap().amount();
        for (level, direction) in [(1.25, BarrierDirection::Up), (0.98, BarrierDirection::Down)] {
            let leg = |knock| {
                let barrier = Barrier::new(level, direction, knock).unwrap();
                let option = FxBarrierOption::new(vanilla, barrier, 0.0).unwrap();
                pricer.present_value(&option, &market).unwrap().amount()
            };
            assert_relative_eq!(leg(KnockType::In) + leg(KnockType::Out), european, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_digital_pay_foreign_matches_inverted_pay_domestic() {
    let market = eurusd_market(1.1, 0.03, 0.045);
    let pricer = FxDigitalOptionPricer::new();
    let strike = 1.12;
    let notional = 1_000_000.0;
    let foreign_paying = FxDigitalOption::new(
        FxOptionTerms::new(eurusd(), strike, 0.5, 0.5, notional, FxOptionType::Call, PositionSide::Long)
            .unwrap(),
        PayLeg::Foreign,
    );
    let inverted = FxDigitalOption::new(
        FxOptionTerms::with_currencies(
            Currency::USD,
            Currency::EUR,
            1.0 / strike,
            0.5,
            0.5,
            notional * strike,
            FxOptionType::Put,
            PositionSide::Long,
        )
        .unwrap(),
        PayLeg::Domestic,
    );
    let a = pricer.present_value(&foreign_paying, &market).unwrap();
    let b = pricer.present_value(&inverted, &market).unwrap();
    assert_eq!(a.currency(), Currency::EUR);
    assert_eq!(b.currency(), Currency::EUR);
    assert_relative_eq!(a.amount(), b.amount(), max_relative = 1e-12);
}

// ============================================================================
// American against European
// ============================================================================

#[test]
fn test_american_equals_european_at_zero_rates() {
    let market = eurusd_market(1.1, 0.0, 0.0);
    for kind in [FxOptionType::Call, FxOptionType::Put] {
        let t = terms(1.12, kind, PositionSide::Long);
        let american = FxAmericanOptionPricer::default()
            .present_value(&FxAmericanOption::new(t), &market)
            .unwrap();
        let european = FxVanillaOptionPricer::new().present_value(&FxVanillaOption::new(t), &market).unwrap();
        assert_relative_eq!(american.amount(), european.amount(), max_relative = 1e-10);
    }
}

#[test]
fn test_american_put_at_least_european_with_positive_rates() {
    let market = eurusd_market(1.1, 0.02, 0.06);
    for strike in [1.0, 1.1, 1.2, 1.3] {
        let t = terms(strike, FxOptionType::Put, PositionSide::Long);
        let american = FxAmericanOptionPricer::default()
            .present_value(&FxAmericanOption::new(t), &market)
            .unwrap()
            .amount();
        let european = FxVanillaOptionPricer::new()
            .present_value(&FxVanillaOption::new(t), &market)
            .unwrap()
            .amount();
        assert!(american >= european, "K={strike}: {american} < {european}");
    }
}

// ============================================================================
// Adjoint against finite difference
// ============================================================================

fn assert_delta_matches_bump<P: FxOptionPricer>(pricer: &P, option: &P::Contract, spot: f64) {
    let market = eurusd_market(spot, 0.03, 0.045).with_surface(FxVolatilitySurface::flat(0.1));
    let pv = |s: f64| {
        let bumped = market.with_spot_rate(Currency::EUR, Currency::USD, s);
        pricer.present_value(option, &bumped).unwrap().amount() / 2_500_000.0
    };
    let h = 1e-4 * spot;
    let fd = (pv(spot + h) - pv(spot - h)) / (2.0 * h);
    let delta = pricer.delta(option, &market, true).unwrap().value;
    assert_relative_eq!(delta, fd, max_relative = 1e-6);
}

#[test]
fn test_analytic_deltas_match_central_difference() {
    for kind in [FxOptionType::Call, FxOptionType::Put] {
        let t = terms(1.1, kind, PositionSide::Long);
        assert_delta_matches_bump(&FxVanillaOptionPricer::new(), &FxVanillaOption::new(t), 1.08);
        assert_delta_matches_bump(&FxAmericanOptionPricer::default(), &FxAmericanOption::new(t), 1.08);
    }
}

// ============================================================================
// Bucketing and curve sensitivities
// ============================================================================

#[test]
fn test_bucketed_vega_sums_to_point_vega() {
    let market = eurusd_market(1.1, 0.03, 0.045);
    let engine = FxOptionEngine::default();
    for contract in book(1.07, FxOptionType::Call, PositionSide::Long) {
        let result = engine.price_with_greeks(&contract, &market, true).unwrap();
        let vega = result.greek(GreekKind::Vega).unwrap().amount().amount();
        let nodes = result.volatility_node_sensitivities.unwrap();
        assert_relative_eq!(nodes.total(), vega, epsilon = 1e-8, max_relative = 1e-10);
    }
}

#[test]
fn test_curve_sensitivities_match_bumped_curves() {
    let (r_eur, r_usd) = (0.03, 0.045);
    let market = eurusd_market(1.1, r_eur, r_usd);
    let engine = FxOptionEngine::default();
    let h = 1e-6;
    for contract in book(1.1, FxOptionType::Put, PositionSide::Long) {
        let sensitivities = engine.curve_sensitivities(&contract, &market).unwrap();
        for (currency, rate) in [(Currency::EUR, r_eur), (Currency::USD, r_usd)] {
            let pv = |r: f64| {
                let bumped = market.with_curve(currency, FlatCurve::new(r));
                engine.present_value(&contract, &bumped).unwrap().amount()
            };
            let fd = (pv(rate + h) - pv(rate - h)) / (2.0 * h);
            let analytic = sensitivities
                .iter()
                .find(|s| s.currency == currency)
                .map(|s| s.value)
                .unwrap();
            assert_relative_eq!(analytic, fd, epsilon = 1e-3, max_relative = 1e-5);
        }
    }
}

// ============================================================================
// Discount-factor-only snapshots
// ============================================================================

#[test]
fn test_discount_factor_snapshot_drops_rate_greeks() {
    init_tracing();
    let market = DiscountFactorSnapshot::new(eurusd_market(1.1, 0.03, 0.045));
    let engine = FxOptionEngine::default();
    let expected: [(&str, usize); 5] = [
        ("vanilla", 6),
        ("american", 6),
        ("digital", 1),
        ("digital", 1),
        ("barrier", 3),
    ];
    for (contract, (family, n_greeks)) in book(1.1, FxOptionType::Call, PositionSide::Long)
        .iter()
        .zip(expected)
    {
        assert_eq!(contract.family(), family);
        let result = engine.price_with_greeks(contract, &market, true).unwrap();
        assert_eq!(result.greeks.len(), n_greeks, "{family}");
        if matches!(contract, FxOptionContract::Digital(_) | FxOptionContract::Barrier(_)) {
            let err = engine.greek(GreekKind::Delta, contract, &market, true).unwrap_err();
            assert!(err.is_unsupported_shape());
        }
    }
}
