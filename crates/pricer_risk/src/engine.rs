//! Contract-level dispatch.
//!
//! [`FxOptionEngine`] owns one pricer per family and routes an
//! [`FxOptionContract`] to the matching one.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::instruments::fx::FxOptionContract;
use tracing::debug;

use crate::config::EngineConfig;
use crate::pricers::{
    FxAmericanOptionPricer, FxBarrierOptionPricer, FxDigitalOptionPricer, FxOptionPricer,
    FxVanillaOptionPricer,
};
use crate::result::{CurrencyExposure, CurveSensitivity, Greek, GreekKind, PricingResult};

/// Runs `$body` with `$pricer` bound to the pricer of the contract's family
/// and `$option` to the inner option.
macro_rules! dispatch {
    ($engine:expr, $contract:expr, |$pricer:ident, $option:ident| $body:expr) => {
        match $contract {
            FxOptionContract::Vanilla($option) => {
                let $pricer = &$engine.vanilla;
                $body
            }
            FxOptionContract::American($option) => {
                let $pricer = &$engine.american;
                $body
            }
            FxOptionContract::Digital($option) => {
                let $pricer = &$engine.digital;
                $body
            }
            FxOptionContract::Barrier($option) => {
                let $pricer = &$engine.barrier;
                $body
            }
        }
    };
}

/// Values any [`FxOptionContract`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::market_data::snapshot::CurveMarketSnapshot;
/// use pricer_core::market_data::surfaces::FxVolatilitySurface;
/// use pricer_core::types::{Currency, CurrencyPair};
/// use pricer_models::instruments::fx::{
///     FxAmericanOption, FxOptionContract, FxOptionTerms, FxOptionType, PositionSide,
/// };
/// use pricer_risk::FxOptionEngine;
///
/// let pair = CurrencyPair::new(Currency::USD, Currency::JPY).unwrap();
/// let market = CurveMarketSnapshot::builder(pair)
///     .spot_rate(Currency::USD, Currency::JPY, 150.0)
///     .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.05))
///     .curve(Currency::JPY, "JPY-TONA", FlatCurve::new(0.001))
///     .surface(FxVolatilitySurface::flat(0.1))
///     .build()
///     .unwrap();
/// let terms = FxOptionTerms::new(pair, 150.0, 0.5, 0.5, 1e6, FxOptionType::Put, PositionSide::Long).unwrap();
/// let contract = FxOptionContract::from(FxAmericanOption::new(terms));
///
/// let engine = FxOptionEngine::default();
/// let result = engine.price_with_greeks(&contract, &market, true).unwrap();
/// assert_eq!(result.present_value.currency(), Currency::JPY);
/// assert!(!engine.has_closed_form_gamma(&contract));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FxOptionEngine {
    config: EngineConfig,
    vanilla: FxVanillaOptionPricer,
    american: FxAmericanOptionPricer,
    digital: FxDigitalOptionPricer,
    barrier: FxBarrierOptionPricer,
}

impl FxOptionEngine {
    /// Creates an engine whose bumped Greeks use `config.finite_difference`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            vanilla: FxVanillaOptionPricer::new(),
            american: FxAmericanOptionPricer::new(config.finite_difference),
            digital: FxDigitalOptionPricer::new(),
            barrier: FxBarrierOptionPricer::new(config.finite_difference),
        }
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Present value in the contract's settlement currency.
    pub fn present_value<S: MarketSnapshot + ?Sized>(
        &self,
        contract: &FxOptionContract,
        snapshot: &S,
    ) -> Result<CurrencyAmount, PricingError> {
        dispatch!(self, contract, |pricer, option| pricer.present_value(option, snapshot))
    }

    /// Present value split into the two currencies.
    pub fn currency_exposure<S: MarketSnapshot + ?Sized>(
        &self,
        contract: &FxOptionContract,
        snapshot: &S,
    ) -> Result<CurrencyExposure, PricingError> {
        dispatch!(self, contract, |pricer, option| pricer.currency_exposure(option, snapshot))
    }

    /// One Greek by kind.
    pub fn greek<S: MarketSnapshot + ?Sized>(
        &self,
        kind: GreekKind,
        contract: &FxOptionContract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        dispatch!(self, contract, |pricer, option| pricer.greek(kind, option, snapshot, direct_quote))
    }

    /// Zero-rate sensitivities at the payment time.
    pub fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        contract: &FxOptionContract,
        snapshot: &S,
    ) -> Result<Vec<CurveSensitivity>, PricingError> {
        dispatch!(self, contract, |pricer, option| pricer.curve_sensitivities(option, snapshot))
    }

    /// Forward FX rate in the orientation the contract is priced in.
    pub fn forward_fx_rate<S: MarketSnapshot + ?Sized>(
        &self,
        contract: &FxOptionContract,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        dispatch!(self, contract, |pricer, option| pricer.forward_fx_rate(option, snapshot))
    }

    /// Volatility used to price the contract.
    pub fn implied_volatility<S: MarketSnapshot + ?Sized>(
        &self,
        contract: &FxOptionContract,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        dispatch!(self, contract, |pricer, option| pricer.implied_volatility(option, snapshot))
    }

    /// Full valuation: present value, exposure, Greeks and bucketed
    /// sensitivities.
    pub fn price_with_greeks<S: MarketSnapshot + ?Sized>(
        &self,
        contract: &FxOptionContract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<PricingResult, PricingError> {
        let result = dispatch!(self, contract, |pricer, option| {
            pricer.price_with_greeks(option, snapshot, direct_quote)
        })?;
        debug!(
            family = contract.family(),
            present_value = result.present_value.amount(),
            greeks = result.greeks.len(),
            "contract valued"
        );
        Ok(result)
    }

    /// Whether the contract's family has an analytic gamma.
    pub fn has_closed_form_gamma(&self, contract: &FxOptionContract) -> bool {
        dispatch!(self, contract, |pricer, _option| pricer.has_closed_form_gamma())
    }
}
