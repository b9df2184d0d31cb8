//! Criterion benchmarks for pricer_risk valuations.
//!
//! Benchmarks cover:
//! - Full valuation (`price_with_greeks`) per option family
//! - Closed-form against bumped gamma
//! - Sequential against rayon batch valuation for growing books

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::FlatCurve;
use pricer_core::market_data::snapshot::CurveMarketSnapshot;
use pricer_core::market_data::surfaces::FxVolatilitySurface;
use pricer_core::types::{Currency, CurrencyPair};
use pricer_models::instruments::fx::{
    Barrier, BarrierDirection, FxAmericanOption, FxBarrierOption, FxDigitalOption, FxOptionContract,
    FxOptionTerms, FxOptionType, FxVanillaOption, KnockType, PayLeg, PositionSide,
};
use pricer_risk::{price_batch, EngineConfig, FxOptionEngine, GreekKind, ParallelConfig};

fn market() -> CurveMarketSnapshot {
    let pair = CurrencyPair::new(Currency::EUR, Currency::USD).expect("valid pair");
    let surface = FxVolatilitySurface::new(
        &[0.25, 0.5, 1.0, 2.0],
        &[1.0, 1.1, 1.2, 1.3],
        &[
            [0.1, 0.095, 0.1, 0.11],
            [0.105, 0.1, 0.105, 0.115],
            [0.11, 0.105, 0.11, 0.12],
            [0.115, 0.11, 0.115, 0.125],
        ],
        true,
    )
    .expect("valid surface");
    CurveMarketSnapshot::builder(pair)
        .spot_rate(Currency::EUR, Currency::USD, 1.15)
        .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(0.025))
        .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.045))
        .surface(surface)
        .build()
        .expect("valid snapshot")
}

fn contract(family: &str, strike: f64, expiry: f64) -> FxOptionContract {
    let pair = CurrencyPair::new(Currency::EUR, Currency::USD).expect("valid pair");
    let terms = FxOptionTerms::new(pair, strike, expiry, expiry, 1e6, FxOptionType::Call, PositionSide::Long)
        .expect("valid terms");
    match family {
        "american" => FxAmericanOption::new(terms).into(),
        "digital" => FxDigitalOption::new(terms, PayLeg::Domestic).into(),
        "barrier" => {
            let barrier = Barrier::new(strike * 1.2, BarrierDirection::Up, KnockType::Out).expect("valid barrier");
            FxBarrierOption::new(FxVanillaOption::new(terms), barrier, 0.0)
                .expect("valid barrier option")
                .into()
        }
        _ => FxVanillaOption::new(terms).into(),
    }
}

fn book(size: usize) -> Vec<FxOptionContract> {
    let families = ["vanilla", "american", "digital", "barrier"];
    (0..size)
        .map(|i| {
            let strike = 1.0 + 0.3 * (i % 31) as f64 / 30.0;
            let expiry = 0.25 + 1.75 * (i % 7) as f64 / 6.0;
            contract(families[i % families.len()], strike, expiry)
        })
        .collect()
}

fn bench_price_with_greeks(c: &mut Criterion) {
    let market = market();
    let engine = FxOptionEngine::default();
    let mut group = c.benchmark_group("price_with_greeks");
    for family in ["vanilla", "american", "digital", "barrier"] {
        let option = contract(family, 1.15, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(family), &option, |b, option| {
            b.iter(|| engine.price_with_greeks(black_box(option), &market, true));
        });
    }
    group.finish();
}

fn bench_gamma(c: &mut Criterion) {
    let market = market();
    let engine = FxOptionEngine::default();
    let mut group = c.benchmark_group("gamma");
    for family in ["vanilla", "barrier"] {
        let option = contract(family, 1.15, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(family), &option, |b, option| {
            b.iter(|| engine.greek(GreekKind::Gamma, black_box(option), &market, true));
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let market = market();
    let mut group = c.benchmark_group("price_batch");
    group.sample_size(20);
    for size in [100, 1_000, 5_000] {
        let contracts = book(size);
        let sequential = EngineConfig {
            parallel: ParallelConfig::new(64, usize::MAX),
            ..EngineConfig::default()
        };
        let parallel = EngineConfig {
            parallel: ParallelConfig::new(64, 0),
            ..EngineConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("sequential", size), &contracts, |b, contracts| {
            b.iter(|| price_batch(black_box(contracts), &market, &sequential));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &contracts, |b, contracts| {
            b.iter(|| price_batch(black_box(contracts), &market, &parallel));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_price_with_greeks, bench_gamma, bench_batch);
criterion_main!(benches);
