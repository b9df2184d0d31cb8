//! FX single-barrier pricer.
//!
//! Prices with the Reiner–Rubinstein closed form on `r = r_domestic` and
//! `b = r_domestic − r_foreign`. Present value, exposure, vega, vanna, vomma
//! and curve sensitivities take both rates from discount factors. Delta,
//! gamma and theta read zero rates from the snapshot, so they need a
//! snapshot that exposes its curves.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::analytical::{BarrierInputs, BarrierPriceAdjoint};
use pricer_models::instruments::fx::{FxBarrierOption, FxOptionTerms};
use tracing::{debug, trace};

use super::{central_difference, check_terms, FxOptionPricer};
use crate::bucketing;
use crate::config::FiniteDifferenceConfig;
use crate::exposure::{carry_chain_rule, currency_exposure, relative_delta, relative_gamma, relative_vanna};
use crate::forward::ForwardRates;
use crate::result::{
    CurrencyExposure, CurveSensitivity, Greek, GreekConvention, GreekKind, SensitivityMethod,
    VolatilityNodeSensitivities,
};

/// Pricer for [`FxBarrierOption`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::market_data::snapshot::CurveMarketSnapshot;
/// use pricer_core::market_data::surfaces::FxVolatilitySurface;
/// use pricer_core::types::{Currency, CurrencyPair};
/// use pricer_models::instruments::fx::{
///     Barrier, BarrierDirection, FxBarrierOption, FxOptionTerms, FxOptionType, FxVanillaOption,
///     KnockType, PositionSide,
/// };
/// use pricer_risk::config::FiniteDifferenceConfig;
/// use pricer_risk::pricers::{FxBarrierOptionPricer, FxOptionPricer};
///
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// let market = CurveMarketSnapshot::builder(pair)
///     .spot_rate(Currency::EUR, Currency::USD, 1.10)
///     .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(0.02))
///     .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.04))
///     .surface(FxVolatilitySurface::flat(0.09))
///     .build()
///     .unwrap();
/// let terms = FxOptionTerms::new(pair, 1.10, 0.5, 0.5, 1e6, FxOptionType::Call, PositionSide::Long).unwrap();
/// let barrier = Barrier::new(1.20, BarrierDirection::Up, KnockType::Out).unwrap();
/// let option = FxBarrierOption::new(FxVanillaOption::new(terms), barrier, 0.0).unwrap();
///
/// let pricer = FxBarrierOptionPricer::new(FiniteDifferenceConfig::default());
/// let pv = pricer.present_value(&option, &market).unwrap();
/// assert!(pv.amount() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FxBarrierOptionPricer {
    config: FiniteDifferenceConfig,
}

/// One barrier valuation: the model inputs plus the contract terms.
struct Valuation {
    terms: FxOptionTerms,
    rates: ForwardRates,
    model: BarrierInputs,
}

impl Valuation {
    fn at_spot(&self, spot: f64) -> BarrierInputs {
        BarrierInputs { spot, ..self.model }
    }

    fn at_vol(&self, volatility: f64) -> BarrierInputs {
        BarrierInputs {
            volatility,
            ..self.model
        }
    }

    fn at_spot_vol(&self, spot: f64, volatility: f64) -> BarrierInputs {
        BarrierInputs {
            spot,
            volatility,
            ..self.model
        }
    }

    fn adjoint(&self) -> BarrierPriceAdjoint {
        self.model.adjoint()
    }

    fn scale(&self) -> f64 {
        self.terms.abs_notional() * self.terms.sign()
    }

    fn greek(&self, kind: GreekKind, value: f64, direct_quote: bool, method: SensitivityMethod) -> Greek {
        Greek::new(
            kind,
            value * self.terms.sign(),
            self.terms.domestic_currency(),
            self.terms.abs_notional(),
            GreekConvention::spot(direct_quote),
            method,
        )
    }
}

impl FxBarrierOptionPricer {
    /// Creates a pricer with the given shifts.
    pub fn new(config: FiniteDifferenceConfig) -> Self {
        Self { config }
    }

    /// Shifts used by the bumped Greeks.
    pub fn config(&self) -> &FiniteDifferenceConfig {
        &self.config
    }

    /// Valuation on rates implied by discount factors.
    fn valuation<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<Valuation, PricingError> {
        let rates = self.forward_rates(option, snapshot)?;
        self.valuation_with_rates(option, snapshot, rates, rates.rate_domestic, rates.rate_foreign)
    }

    /// Valuation on the snapshot's zero rates.
    fn zero_rate_valuation<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<Valuation, PricingError> {
        let rates = self.forward_rates(option, snapshot)?;
        let terms = option.terms();
        let rate_domestic = snapshot.zero_rate(terms.domestic_currency(), terms.payment_time())?;
        let rate_foreign = snapshot.zero_rate(terms.foreign_currency(), terms.payment_time())?;
        self.valuation_with_rates(option, snapshot, rates, rate_domestic, rate_foreign)
    }

    fn valuation_with_rates<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        rates: ForwardRates,
        rate_domestic: f64,
        rate_foreign: f64,
    ) -> Result<Valuation, PricingError> {
        let terms = *option.terms();
        let volatility = snapshot.volatility(
            terms.foreign_currency(),
            terms.domestic_currency(),
            terms.expiry(),
            terms.strike(),
            rates.forward,
        )?;
        let model = BarrierInputs {
            spot: rates.spot,
            strike: terms.strike(),
            rate: rate_domestic,
            carry: rate_domestic - rate_foreign,
            expiry: terms.expiry(),
            volatility,
            rebate: option.rebate_per_foreign_unit(),
            is_call: terms.is_call(),
            barrier: *option.barrier(),
        };
        Ok(Valuation { terms, rates, model })
    }

    /// Unsigned spot delta and gamma per unit notional.
    fn spot_delta_gamma(&self, valuation: &Valuation) -> (f64, f64) {
        let s = valuation.model.spot;
        let h = self.config.gamma_shift();
        let up = valuation.at_spot(s * (1.0 + h)).adjoint().d_spot;
        let down = valuation.at_spot(s * (1.0 - h)).adjoint().d_spot;
        trace!(family = "barrier", shift = h, up, down, "gamma bump");
        (valuation.adjoint().d_spot, central_difference(up, down, h * s))
    }

    /// `−∂P/∂T` by bumping the expiry of `model`. Centered, or forward
    /// only when the expiry is inside the theta shift.
    fn expiry_decay(&self, model: &BarrierInputs) -> f64 {
        let dt = self.config.theta_shift();
        let t = model.expiry;
        let longer = BarrierInputs { expiry: t + dt, ..*model }.price();
        if t > dt {
            let shorter = BarrierInputs { expiry: t - dt, ..*model }.price();
            trace!(family = "barrier", shift = dt, longer, shorter, "theta bump");
            -central_difference(longer, shorter, dt)
        } else {
            let now = model.price();
            trace!(family = "barrier", shift = dt, longer, now, "one-sided theta bump");
            -(longer - now) / dt
        }
    }

    /// Unsigned vanna per unit notional: cross difference of the price.
    fn spot_vanna(&self, valuation: &Valuation) -> f64 {
        let s = valuation.model.spot;
        let sigma = valuation.model.volatility;
        let h = self.config.vanna_shift();
        let (s_up, s_down) = (s * (1.0 + h), s * (1.0 - h));
        let (v_up, v_down) = (sigma * (1.0 + h), sigma * (1.0 - h));
        let cross = valuation.at_spot_vol(s_up, v_up).price()
            - valuation.at_spot_vol(s_up, v_down).price()
            - valuation.at_spot_vol(s_down, v_up).price()
            + valuation.at_spot_vol(s_down, v_down).price();
        trace!(family = "barrier", shift = h, cross, "vanna bump");
        cross / (2.0 * h * s) / (2.0 * h * sigma)
    }

    /// Vega of the undiscounted price, `vega / df_domestic`, per unit
    /// notional.
    ///
    /// # Errors
    ///
    /// Fails like [`FxOptionPricer::present_value`].
    pub fn forward_vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<Greek, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let vega = valuation.adjoint().d_vol / valuation.rates.df_domestic;
        Ok(Greek {
            convention: GreekConvention::forward(true),
            ..valuation.greek(GreekKind::Vega, vega, true, SensitivityMethod::Adjoint)
        })
    }

    /// Driftless theta: expiry decay of the price with spot set to the
    /// forward and both rates at zero, per unit notional.
    ///
    /// # Errors
    ///
    /// Fails like [`FxOptionPricer::present_value`].
    pub fn forward_driftless_theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<Greek, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let driftless = BarrierInputs {
            spot: valuation.rates.forward,
            rate: 0.0,
            carry: 0.0,
            ..valuation.model
        };
        let theta = self.expiry_decay(&driftless);
        Ok(Greek {
            convention: GreekConvention::forward(true),
            ..valuation.greek(GreekKind::Theta, theta, true, SensitivityMethod::FiniteDifference)
        })
    }

    /// Derivative of vega with respect to spot, per unit notional with the
    /// position sign. Differences the adjoint vega with the vanna shift.
    ///
    /// # Errors
    ///
    /// Fails like [`FxOptionPricer::present_value`].
    pub fn d_vega_d_spot<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let s = valuation.model.spot;
        let h = self.config.vanna_shift();
        let up = valuation.at_spot(s * (1.0 + h)).adjoint().d_vol;
        let down = valuation.at_spot(s * (1.0 - h)).adjoint().d_vol;
        Ok(central_difference(up, down, h * s) * valuation.terms.sign())
    }

    /// Derivative of delta with respect to volatility, per unit notional
    /// with the position sign. Differences the adjoint delta with the vanna
    /// shift.
    ///
    /// # Errors
    ///
    /// Fails like [`FxOptionPricer::present_value`].
    pub fn d_delta_d_vol<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let sigma = valuation.model.volatility;
        let h = self.config.vanna_shift();
        let up = valuation.at_vol(sigma * (1.0 + h)).adjoint().d_spot;
        let down = valuation.at_vol(sigma * (1.0 - h)).adjoint().d_spot;
        Ok(central_difference(up, down, h * sigma) * valuation.terms.sign())
    }
}

impl FxOptionPricer for FxBarrierOptionPricer {
    type Contract = FxBarrierOption;

    fn forward_rates<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<ForwardRates, PricingError> {
        let terms = option.terms();
        check_terms(snapshot, terms)?;
        ForwardRates::from_snapshot(
            snapshot,
            terms.foreign_currency(),
            terms.domestic_currency(),
            terms.payment_time(),
        )
    }

    fn present_value<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<CurrencyAmount, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let price = valuation.model.price();
        debug!(
            family = "barrier",
            barrier = option.barrier().level(),
            breached = option.barrier().is_breached(valuation.model.spot),
            volatility = valuation.model.volatility,
            price,
            "barrier price"
        );
        Ok(CurrencyAmount::new(
            valuation.terms.domestic_currency(),
            price * valuation.scale(),
        ))
    }

    fn currency_exposure<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<CurrencyExposure, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let adjoint = valuation.adjoint();
        Ok(currency_exposure(
            valuation.terms.foreign_currency(),
            valuation.terms.domestic_currency(),
            adjoint.d_spot,
            valuation.terms.notional(),
            valuation.terms.sign(),
            valuation.rates.spot,
            adjoint.price * valuation.scale(),
        ))
    }

    /// Plain spot adjoint `∂P/∂S` on zero rates, not divided by
    /// `df_foreign`.
    fn delta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let valuation = self.zero_rate_valuation(option, snapshot)?;
        let value = relative_delta(valuation.adjoint().d_spot, valuation.model.spot, direct_quote);
        Ok(valuation.greek(GreekKind::Delta, value, direct_quote, SensitivityMethod::Adjoint))
    }

    fn gamma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let valuation = self.zero_rate_valuation(option, snapshot)?;
        let (delta, gamma) = self.spot_delta_gamma(&valuation);
        let value = relative_gamma(gamma, delta, valuation.model.spot, direct_quote);
        Ok(valuation.greek(GreekKind::Gamma, value, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let vega = valuation.adjoint().d_vol;
        Ok(valuation.greek(GreekKind::Vega, vega, direct_quote, SensitivityMethod::Adjoint))
    }

    fn theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let valuation = self.zero_rate_valuation(option, snapshot)?;
        let theta = self.expiry_decay(&valuation.model);
        Ok(valuation.greek(GreekKind::Theta, theta, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn vanna<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let value = relative_vanna(self.spot_vanna(&valuation), valuation.model.spot, direct_quote);
        Ok(valuation.greek(GreekKind::Vanna, value, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn vomma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let sigma = valuation.model.volatility;
        let h = self.config.vomma_shift();
        let up = valuation.at_vol(sigma * (1.0 + h)).adjoint().d_vol;
        let down = valuation.at_vol(sigma * (1.0 - h)).adjoint().d_vol;
        trace!(family = "barrier", shift = h, up, down, "vomma bump");
        let vomma = central_difference(up, down, h * sigma);
        Ok(valuation.greek(GreekKind::Vomma, vomma, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<Vec<CurveSensitivity>, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let adjoint = valuation.adjoint();
        let (domestic, foreign) = carry_chain_rule(adjoint.d_rate, adjoint.d_carry);
        let scale = valuation.scale();
        let time = valuation.terms.payment_time();
        bucketing::curve_sensitivities(
            snapshot,
            &[
                (valuation.terms.foreign_currency(), time, foreign * scale),
                (valuation.terms.domestic_currency(), time, domestic * scale),
            ],
        )
    }

    fn volatility_node_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<VolatilityNodeSensitivities, PricingError> {
        let valuation = self.valuation(option, snapshot)?;
        let (_, weights) = snapshot.volatility_with_node_sensitivities(
            valuation.terms.foreign_currency(),
            valuation.terms.domestic_currency(),
            valuation.terms.expiry(),
            valuation.terms.strike(),
            valuation.rates.forward,
        )?;
        let point_vega = valuation.adjoint().d_vol * valuation.scale();
        Ok(bucketing::volatility_node_sensitivities(
            snapshot.currency_pair(),
            point_vega,
            &weights,
        ))
    }

    fn implied_volatility<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxBarrierOption,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        Ok(self.valuation(option, snapshot)?.model.volatility)
    }

    fn has_closed_form_gamma(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_core::market_data::snapshot::{CurveMarketSnapshot, DiscountFactorSnapshot};
    use pricer_core::market_data::surfaces::FxVolatilitySurface;
    use pricer_core::types::{Currency, CurrencyPair};
    use pricer_models::instruments::fx::{
        Barrier, BarrierDirection, FxOptionType, FxVanillaOption, KnockType, PositionSide,
    };

    use crate::pricers::FxVanillaOptionPricer;

    fn eurusd() -> CurrencyPair {
        CurrencyPair::new(Currency::EUR, Currency::USD).unwrap()
    }

    fn snapshot() -> CurveMarketSnapshot {
        CurveMarketSnapshot::builder(eurusd())
            .spot_rate(Currency::EUR, Currency::USD, 1.10)
            .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(0.025))
            .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.045))
            .surface(FxVolatilitySurface::flat(0.09))
            .build()
            .unwrap()
    }

    fn vanilla(kind: FxOptionType) -> FxVanillaOption {
        FxVanillaOption::new(
            FxOptionTerms::new(eurusd(), 1.08, 0.75, 0.75, 1e6, kind, PositionSide::Long).unwrap(),
        )
    }

    fn barrier_option(
        kind: FxOptionType,
        level: f64,
        direction: BarrierDirection,
        knock: KnockType,
        rebate: f64,
    ) -> FxBarrierOption {
        let barrier = Barrier::new(level, direction, knock).unwrap();
        FxBarrierOption::new(vanilla(kind), barrier, rebate).unwrap()
    }

    fn pricer() -> FxBarrierOptionPricer {
        FxBarrierOptionPricer::new(FiniteDifferenceConfig::default())
    }

    // ========================================
    // Price
    // ========================================

    #[test]
    fn test_in_out_parity_without_rebate() {
        let market = snapshot();
        let european = FxVanillaOptionPricer::new()
            .present_value(&vanilla(FxOptionType::Call), &market)
            .unwrap()
            .amount();
        for (level, direction) in [(1.20, BarrierDirection::Up), (1.00, BarrierDirection::Down)] {
            let knock_in = barrier_option(FxOptionType::Call, level, direction, KnockType::In, 0.0);
            let knock_out = barrier_option(FxOptionType::Call, level, direction, KnockType::Out, 0.0);
            let sum = pricer().present_value(&knock_in, &market).unwrap().amount()
                + pricer().present_value(&knock_out, &market).unwrap().amount();
            assert_relative_eq!(sum, european, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_breached_knock_out_pays_rebate() {
        let market = snapshot();
        let option = barrier_option(FxOptionType::Put, 1.12, BarrierDirection::Down, KnockType::Out, 2_000.0);
        let pv = pricer().present_value(&option, &market).unwrap();
        assert_relative_eq!(pv.amount(), 2_000.0, max_relative = 1e-12);
        assert_eq!(pv.currency(), Currency::USD);
    }

    // ========================================
    // Greeks
    // ========================================

    #[test]
    fn test_gamma_stable_under_shift_halving() {
        let market = snapshot();
        let option = barrier_option(FxOptionType::Call, 1.25, BarrierDirection::Up, KnockType::Out, 0.0);
        let coarse = pricer().gamma(&option, &market, true).unwrap().value;
        let fine_config = FiniteDifferenceConfig::builder()
            .gamma_shift(5e-6)
            .build()
            .unwrap();
        let fine = FxBarrierOptionPricer::new(fine_config)
            .gamma(&option, &market, true)
            .unwrap()
            .value;
        assert_relative_eq!(coarse, fine, max_relative = 1e-2);
    }

    #[test]
    fn test_delta_matches_bumped_spot() {
        let market = snapshot();
        let option = barrier_option(FxOptionType::Put, 1.00, BarrierDirection::Down, KnockType::In, 500.0);
        let pv = |s: f64| {
            pricer()
                .present_value(&option, &market.with_spot_rate(Currency::EUR, Currency::USD, s))
                .unwrap()
                .amount()
                / 1e6
        };
        let h = 1e-5;
        let fd = (pv(1.10 + h) - pv(1.10 - h)) / (2.0 * h);
        let delta = pricer().delta(&option, &market, true).unwrap();
        assert_relative_eq!(delta.value, fd, max_relative = 1e-5);
        assert_eq!(delta.method, SensitivityMethod::Adjoint);
    }

    #[test]
    fn test_cross_derivatives_agree() {
        let market = snapshot();
        let option = barrier_option(FxOptionType::Call, 1.25, BarrierDirection::Up, KnockType::Out, 0.0);
        let vanna = pricer().vanna(&option, &market, true).unwrap().value;
        let d_vega_d_spot = pricer().d_vega_d_spot(&option, &market).unwrap();
        let d_delta_d_vol = pricer().d_delta_d_vol(&option, &market).unwrap();
        assert_relative_eq!(vanna, d_vega_d_spot, max_relative = 1e-3);
        assert_relative_eq!(vanna, d_delta_d_vol, max_relative = 1e-3);
    }

    #[test]
    fn test_theta_finite_inside_last_hour() {
        let market = snapshot();
        let t = 0.5 / 365.0 / 24.0;
        let dt = FiniteDifferenceConfig::default().theta_shift();
        let terms = FxOptionTerms::new(eurusd(), 1.10, t, t, 1e6, FxOptionType::Call, PositionSide::Long).unwrap();
        let barrier = Barrier::new(1.20, BarrierDirection::Up, KnockType::Out).unwrap();
        let option = FxBarrierOption::new(FxVanillaOption::new(terms), barrier, 0.0).unwrap();

        let theta = pricer().theta(&option, &market, true).unwrap();
        assert!(theta.value.is_finite());
        assert_eq!(theta.method, SensitivityMethod::FiniteDifference);

        let pv = |expiry: f64| {
            let terms = terms.with_expiry(expiry);
            let option = FxBarrierOption::new(FxVanillaOption::new(terms), barrier, 0.0).unwrap();
            pricer().present_value(&option, &market).unwrap().amount() / 1e6
        };
        assert_relative_eq!(theta.value, -(pv(t + dt) - pv(t)) / dt, max_relative = 1e-6);
        assert!(theta.value < 0.0);
    }

    #[test]
    fn test_forward_greeks() {
        let market = snapshot();
        let knock_in = barrier_option(FxOptionType::Call, 1.25, BarrierDirection::Up, KnockType::In, 0.0);
        let df = market.discount_factor(Currency::USD, 0.75).unwrap();
        let vega = pricer().vega(&knock_in, &market, true).unwrap();
        let forward_vega = pricer().forward_vega(&knock_in, &market).unwrap();
        assert_eq!(forward_vega.convention, GreekConvention::forward(true));
        assert_relative_eq!(forward_vega.value * df, vega.value, max_relative = 1e-12);

        // far barrier: driftless theta of the vanilla, −Fφ(d1)σ/(2√t)
        let remote = barrier_option(FxOptionType::Call, 5.0, BarrierDirection::Up, KnockType::Out, 0.0);
        let theta = pricer().forward_driftless_theta(&remote, &market).unwrap();
        let vanilla_theta = FxVanillaOptionPricer::new()
            .theta(&vanilla(FxOptionType::Call), &market, true)
            .unwrap();
        assert_eq!(theta.convention, GreekConvention::forward(true));
        assert_relative_eq!(theta.value, vanilla_theta.value, max_relative = 1e-6);
    }

    #[test]
    fn test_rate_greeks_need_zero_rates() {
        let market = DiscountFactorSnapshot::new(snapshot());
        let option = barrier_option(FxOptionType::Call, 1.25, BarrierDirection::Up, KnockType::Out, 0.0);
        for kind in [GreekKind::Delta, GreekKind::Gamma, GreekKind::Theta] {
            let err = pricer().greek(kind, &option, &market, true).unwrap_err();
            assert!(err.is_unsupported_shape(), "{kind}: {err}");
        }
        for kind in [GreekKind::Vega, GreekKind::Vanna, GreekKind::Vomma] {
            assert!(pricer().greek(kind, &option, &market, true).is_ok());
        }
        assert!(pricer().present_value(&option, &market).is_ok());
        assert!(pricer().currency_exposure(&option, &market).is_ok());
    }

    // ========================================
    // Curve sensitivities
    // ========================================

    #[test]
    fn test_carry_chain_rule_matches_bumped_curves() {
        let market = snapshot();
        let option = barrier_option(FxOptionType::Call, 1.25, BarrierDirection::Up, KnockType::Out, 1_000.0);
        let sensitivities = pricer().curve_sensitivities(&option, &market).unwrap();
        let h = 1e-6;
        let pv = |ccy: Currency, r: f64| {
            pricer()
                .present_value(&option, &market.with_curve(ccy, FlatCurve::new(r)))
                .unwrap()
                .amount()
        };
        let fd_eur = (pv(Currency::EUR, 0.025 + h) - pv(Currency::EUR, 0.025 - h)) / (2.0 * h);
        let fd_usd = (pv(Currency::USD, 0.045 + h) - pv(Currency::USD, 0.045 - h)) / (2.0 * h);
        assert_eq!(sensitivities[0].curve_name, "EUR-ESTR");
        assert_relative_eq!(sensitivities[0].value, fd_eur, max_relative = 1e-5);
        assert_relative_eq!(sensitivities[1].value, fd_usd, max_relative = 1e-5);
    }
}
