//! # Pricer Risk (L4: Application)
//!
//! Valuation and risk of FX options against a market snapshot.
//!
//! This crate provides:
//! - One pricer per option family behind the [`FxOptionPricer`] trait:
//!   European (Garman–Kohlhagen), American (Bjerksund–Stensland 2002),
//!   digital and single barrier
//! - Greeks (delta, gamma, vega, theta, vanna, vomma) in direct or
//!   reciprocal quote, plus forward and relative-spot variants
//! - Two-currency exposure, zero-rate curve sensitivities and vega bucketed
//!   onto the volatility surface
//! - [`FxOptionEngine`] dispatching over [`FxOptionContract`]
//! - Rayon batch valuation with per-currency aggregation
//! - TOML-loadable finite-difference and parallel settings
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  engine      - contract dispatch       │
//! │  pricers/    - vanilla, american,      │
//! │                digital, barrier        │
//! │  forward     - forward and rates       │
//! │  exposure    - quote conversions       │
//! │  bucketing   - curve and vol buckets   │
//! │  parallel/   - rayon batch valuation   │
//! │  config      - shifts, batch settings  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)           │
//! │  closed forms and FX contracts         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            pricer_core (L1)            │
//! │  currencies, curves, surfaces, snapshot│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Pricers emit `tracing` events (`debug!` per valuation, `trace!` per
//! finite-difference bump, `warn!`/`info!` from batches). The crate never
//! installs a subscriber.
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::curves::FlatCurve;
//! use pricer_core::market_data::snapshot::CurveMarketSnapshot;
//! use pricer_core::market_data::surfaces::FxVolatilitySurface;
//! use pricer_core::types::{Currency, CurrencyPair};
//! use pricer_models::instruments::fx::{
//!     FxOptionContract, FxOptionTerms, FxOptionType, FxVanillaOption, PositionSide,
//! };
//! use pricer_risk::{price_batch, EngineConfig, GreekKind};
//!
//! let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
//! let market = CurveMarketSnapshot::builder(pair)
//!     .spot_rate(Currency::EUR, Currency::USD, 1.2)
//!     .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(0.0))
//!     .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.0))
//!     .surface(FxVolatilitySurface::flat(0.1))
//!     .build()
//!     .unwrap();
//!
//! let contracts: Vec<FxOptionContract> = [1.1, 1.2, 1.3]
//!     .iter()
//!     .map(|&k| {
//!         let terms = FxOptionTerms::new(pair, k, 1.0, 1.0, 1e6, FxOptionType::Call, PositionSide::Long).unwrap();
//!         FxVanillaOption::new(terms).into()
//!     })
//!     .collect();
//!
//! let batch = price_batch(&contracts, &market, &EngineConfig::default());
//! assert_eq!(batch.stats.successful, 3);
//! let atm = batch.results[1].as_ref().unwrap();
//! assert!((atm.greek(GreekKind::Delta).unwrap().value - 0.5199).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bucketing;
pub mod config;
pub mod engine;
pub mod exposure;
pub mod forward;
pub mod parallel;
pub mod pricers;
pub mod result;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig, FiniteDifferenceConfig};
pub use engine::FxOptionEngine;
pub use forward::ForwardRates;
pub use parallel::{
    aggregate_present_value, price_batch, BatchStats, BatchValuation, ParallelConfig,
    DEFAULT_BATCH_SIZE,
};
pub use pricer_models::instruments::fx::FxOptionContract;
pub use pricers::{
    FxAmericanOptionPricer, FxBarrierOptionPricer, FxDigitalOptionPricer, FxOptionPricer,
    FxVanillaOptionPricer,
};
pub use result::{
    CurrencyExposure, CurveSensitivity, Greek, GreekConvention, GreekKind, PricingResult,
    QuoteConvention, SensitivityMethod, UnderlyingConvention, VolatilityNodeSensitivities,
};
