//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use pricer_core::market_data::curves::FlatCurve;
use pricer_core::market_data::snapshot::CurveMarketSnapshot;
use pricer_core::market_data::surfaces::FxVolatilitySurface;
use pricer_core::types::{Currency, CurrencyPair};
use pricer_models::instruments::fx::{
    Barrier, BarrierDirection, FxAmericanOption, FxBarrierOption, FxDigitalOption, FxOptionContract,
    FxOptionTerms, FxOptionType, FxVanillaOption, KnockType, PayLeg, PositionSide,
};
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once; filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn eurusd() -> CurrencyPair {
    CurrencyPair::new(Currency::EUR, Currency::USD).unwrap()
}

/// EUR/USD snapshot on flat curves with a small strike smile.
pub fn eurusd_market(spot: f64, r_eur: f64, r_usd: f64) -> CurveMarketSnapshot {
    let surface = FxVolatilitySurface::new(
        &[0.25, 0.5, 1.0, 2.0],
        &[0.9, 1.0, 1.1, 1.2, 1.3],
        &[
            [0.105, 0.095, 0.09, 0.095, 0.105],
            [0.11, 0.1, 0.095, 0.1, 0.11],
            [0.115, 0.105, 0.1, 0.105, 0.115],
            [0.12, 0.11, 0.105, 0.11, 0.12],
        ],
        true,
    )
    .unwrap();
    CurveMarketSnapshot::builder(eurusd())
        .spot_rate(Currency::EUR, Currency::USD, spot)
        .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(r_eur))
        .curve(Currency::USD, "USD-SOFR", FlatCurve::new(r_usd))
        .surface(surface)
        .build()
        .unwrap()
}

pub fn terms(strike: f64, kind: FxOptionType, side: PositionSide) -> FxOptionTerms {
    FxOptionTerms::new(eurusd(), strike, 0.75, 0.76, 2_500_000.0, kind, side).unwrap()
}

/// One contract of every family on the same terms.
pub fn book(strike: f64, kind: FxOptionType, side: PositionSide) -> Vec<FxOptionContract> {
    let t = terms(strike, kind, side);
    let barrier = match kind {
        FxOptionType::Call => Barrier::new(strike * 1.2, BarrierDirection::Up, KnockType::Out),
        FxOptionType::Put => Barrier::new(strike * 0.8, BarrierDirection::Down, KnockType::Out),
    }
    .unwrap();
    vec![
        FxVanillaOption::new(t).into(),
        FxAmericanOption::new(t).into(),
        FxDigitalOption::new(t, PayLeg::Domestic).into(),
        FxDigitalOption::new(t, PayLeg::Foreign).into(),
        FxBarrierOption::new(FxVanillaOption::new(t), barrier, 10_000.0).unwrap().into(),
    ]
}
