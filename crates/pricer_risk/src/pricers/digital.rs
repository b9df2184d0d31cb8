//! FX digital (cash-or-nothing) pricer.
//!
//! The option is priced in the orientation of its pay leg. Paying the
//! domestic currency the payout is `|N|·K` of ccy2 on `ccy1/ccy2` with
//! strike `K`. Paying the foreign currency the pair is inverted: the payout
//! is `|N|` of ccy1 on `ccy2/ccy1` with strike `1/K` and the call flag
//! complemented.
//!
//! Present value, exposure, vega and curve sensitivities use discount
//! factors only. Delta, gamma, theta, vanna and vomma are closed forms in
//! spot with zero rates read from the snapshot.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::analytical::{Digital, DigitalGreeks};
use pricer_models::instruments::fx::FxDigitalOption;
use tracing::debug;

use super::{check_terms, FxOptionPricer};
use crate::bucketing;
use crate::exposure::{currency_exposure, relative_delta, relative_gamma, relative_vanna};
use crate::forward::ForwardRates;
use crate::result::{
    CurrencyExposure, CurveSensitivity, Greek, GreekConvention, GreekKind, SensitivityMethod,
    VolatilityNodeSensitivities,
};

/// Pricer for [`FxDigitalOption`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FxDigitalOptionPricer;

/// The option seen from its pay currency.
struct PayLegView {
    option: FxDigitalOption,
    rates: ForwardRates,
    volatility: f64,
}

impl PayLegView {
    fn strike(&self) -> f64 {
        self.option.pay_strike()
    }

    fn is_call(&self) -> bool {
        self.option.pay_option_type().is_call()
    }

    fn expiry(&self) -> f64 {
        self.option.terms().expiry()
    }

    fn forward_form(&self) -> Digital {
        Digital::from_forward(
            self.rates.forward,
            self.strike(),
            self.expiry(),
            self.volatility,
            self.rates.df_domestic,
        )
    }

    /// Forward form without discounting: no rate, no carry.
    fn undiscounted_forward_form(&self) -> Digital {
        Digital::from_forward(self.rates.forward, self.strike(), self.expiry(), self.volatility, 1.0)
    }

    fn forward_greek(&self, kind: GreekKind, unit_value: f64) -> Greek {
        Greek {
            convention: GreekConvention::forward(true),
            ..self.greek(kind, unit_value, true)
        }
    }

    /// Payout amount with the position sign.
    fn scale(&self) -> f64 {
        self.option.payout_amount() * self.option.terms().sign()
    }

    /// Converts a unit-payout quantity to a per-notional one.
    fn per_notional(&self) -> f64 {
        self.scale() / self.option.terms().abs_notional()
    }

    fn present_value(&self) -> f64 {
        self.forward_form().price(self.is_call()) * self.scale()
    }

    fn greek(&self, kind: GreekKind, unit_value: f64, direct_quote: bool) -> Greek {
        Greek::new(
            kind,
            unit_value * self.per_notional(),
            self.option.pay_currency(),
            self.option.terms().abs_notional(),
            GreekConvention::spot(direct_quote),
            SensitivityMethod::ClosedForm,
        )
    }

    /// Spot Greeks per unit payout, on zero rates from the snapshot.
    fn spot_greeks<S: MarketSnapshot + ?Sized>(&self, snapshot: &S) -> Result<DigitalGreeks, PricingError> {
        let time = self.option.terms().payment_time();
        let rate_pay = snapshot.zero_rate(self.option.pay_currency(), time)?;
        let rate_other = snapshot.zero_rate(self.option.other_currency(), time)?;
        Ok(Digital::from_spot(
            self.rates.spot,
            self.strike(),
            self.expiry(),
            self.volatility,
            rate_pay,
            rate_pay - rate_other,
        )
        .greeks(self.is_call()))
    }
}

impl FxDigitalOptionPricer {
    /// Creates the pricer.
    pub fn new() -> Self {
        Self
    }

    fn view<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<PayLegView, PricingError> {
        let rates = self.forward_rates(option, snapshot)?;
        let volatility = snapshot.volatility(
            option.other_currency(),
            option.pay_currency(),
            option.terms().expiry(),
            option.pay_strike(),
            rates.forward,
        )?;
        let view = PayLegView {
            option: *option,
            rates,
            volatility,
        };
        debug!(
            family = "digital",
            pay_currency = %option.pay_currency(),
            forward = rates.forward,
            volatility,
            price = view.forward_form().price(view.is_call()),
            "digital price"
        );
        Ok(view)
    }

    /// Vega of the undiscounted forward price, per unit notional.
    ///
    /// Needs only discount factors.
    ///
    /// # Errors
    ///
    /// Fails like [`FxOptionPricer::present_value`].
    pub fn forward_vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let vega = view.undiscounted_forward_form().greeks(view.is_call()).vega;
        Ok(view.forward_greek(GreekKind::Vega, vega))
    }

    /// Driftless theta: decay of the undiscounted forward price with the
    /// forward held fixed, per unit notional.
    ///
    /// # Errors
    ///
    /// Fails like [`FxOptionPricer::present_value`].
    pub fn forward_driftless_theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let theta = view.undiscounted_forward_form().greeks(view.is_call()).theta;
        Ok(view.forward_greek(GreekKind::Theta, theta))
    }
}

impl FxOptionPricer for FxDigitalOptionPricer {
    type Contract = FxDigitalOption;

    /// Rates in the pay-leg orientation: `domestic` is the pay currency.
    fn forward_rates<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<ForwardRates, PricingError> {
        check_terms(snapshot, option.terms())?;
        ForwardRates::from_snapshot(
            snapshot,
            option.other_currency(),
            option.pay_currency(),
            option.terms().payment_time(),
        )
    }

    fn present_value<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<CurrencyAmount, PricingError> {
        let view = self.view(option, snapshot)?;
        Ok(CurrencyAmount::new(option.pay_currency(), view.present_value()))
    }

    fn currency_exposure<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<CurrencyExposure, PricingError> {
        let view = self.view(option, snapshot)?;
        let forward_delta = view.forward_form().greeks(view.is_call()).delta;
        let spot_delta = forward_delta * view.rates.df_foreign / view.rates.df_domestic;
        let terms = option.terms();
        Ok(currency_exposure(
            option.other_currency(),
            option.pay_currency(),
            spot_delta * option.payout_amount() / terms.abs_notional(),
            terms.notional(),
            terms.sign(),
            view.rates.spot,
            view.present_value(),
        ))
    }

    fn delta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let g = view.spot_greeks(snapshot)?;
        let value = relative_delta(g.delta, view.rates.spot, direct_quote);
        Ok(view.greek(GreekKind::Delta, value, direct_quote))
    }

    fn gamma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let g = view.spot_greeks(snapshot)?;
        let value = relative_gamma(g.gamma, g.delta, view.rates.spot, direct_quote);
        Ok(view.greek(GreekKind::Gamma, value, direct_quote))
    }

    fn vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let vega = view.forward_form().greeks(view.is_call()).vega;
        Ok(view.greek(GreekKind::Vega, vega, direct_quote))
    }

    fn theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let theta = view.spot_greeks(snapshot)?.theta;
        Ok(view.greek(GreekKind::Theta, theta, direct_quote))
    }

    fn vanna<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let g = view.spot_greeks(snapshot)?;
        let value = relative_vanna(g.vanna, view.rates.spot, direct_quote);
        Ok(view.greek(GreekKind::Vanna, value, direct_quote))
    }

    fn vomma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let view = self.view(option, snapshot)?;
        let vomma = view.spot_greeks(snapshot)?.vomma;
        Ok(view.greek(GreekKind::Vomma, vomma, direct_quote))
    }

    fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<Vec<CurveSensitivity>, PricingError> {
        let view = self.view(option, snapshot)?;
        let forward_bar = view.forward_form().greeks(view.is_call()).delta * view.scale();
        let (r_pay, r_other) = view.rates.rate_adjoints(forward_bar, view.present_value());
        let time = option.terms().payment_time();
        bucketing::curve_sensitivities(
            snapshot,
            &[
                (option.other_currency(), time, r_other),
                (option.pay_currency(), time, r_pay),
            ],
        )
    }

    fn volatility_node_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<VolatilityNodeSensitivities, PricingError> {
        let view = self.view(option, snapshot)?;
        let (_, weights) = snapshot.volatility_with_node_sensitivities(
            option.other_currency(),
            option.pay_currency(),
            option.terms().expiry(),
            option.pay_strike(),
            view.rates.forward,
        )?;
        let point_vega = view.forward_form().greeks(view.is_call()).vega * view.scale();
        Ok(bucketing::volatility_node_sensitivities(
            snapshot.currency_pair(),
            point_vega,
            &weights,
        ))
    }

    fn implied_volatility<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxDigitalOption,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        Ok(self.view(option, snapshot)?.volatility)
    }

    fn has_closed_form_gamma(&self) -> bool {
        true
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
    use pricer_models::instruments::fx::{FxOptionTerms, FxOptionType, PayLeg, PositionSide};

    fn audusd() -> CurrencyPair {
        CurrencyPair::new(Currency::AUD, Currency::USD).unwrap()
    }

    fn snapshot(spot: f64) -> CurveMarketSnapshot {
        let surface = FxVolatilitySurface::new(
            &[0.25, 1.0],
            &[0.6, 0.65, 0.7],
            &[[0.12, 0.11, 0.115], [0.125, 0.115, 0.12]],
            true,
        )
        .unwrap();
        CurveMarketSnapshot::builder(audusd())
            .spot_rate(Currency::AUD, Currency::USD, spot)
            .curve(Currency::AUD, "AUD-AONIA", FlatCurve::new(0.04))
            .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.045))
            .surface(surface)
            .build()
            .unwrap()
    }

    fn digital(kind: FxOptionType, leg: PayLeg) -> FxDigitalOption {
        let terms = FxOptionTerms::new(audusd(), 0.66, 0.6, 0.6, 5e5, kind, PositionSide::Long).unwrap();
        FxDigitalOption::new(terms, leg)
    }

    // ========================================
    // Price
    // ========================================

    #[test]
    fn test_call_put_sum_to_discounted_amount() {
        let market = snapshot(0.655);
        let pricer = FxDigitalOptionPricer::new();
        for leg in [PayLeg::Domestic, PayLeg::Foreign] {
            let call = digital(FxOptionType::Call, leg);
            let put = digital(FxOptionType::Put, leg);
            let sum = pricer.present_value(&call, &market).unwrap().amount()
                + pricer.present_value(&put, &market).unwrap().amount();
            let df = market.discount_factor(call.pay_currency(), 0.6).unwrap();
            assert_relative_eq!(sum, call.payout_amount() * df, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_pv_currency_follows_pay_leg() {
        let market = snapshot(0.655);
        let pricer = FxDigitalOptionPricer::new();
        let foreign = pricer
            .present_value(&digital(FxOptionType::Call, PayLeg::Foreign), &market)
            .unwrap();
        assert_eq!(foreign.currency(), Currency::AUD);
        let domestic = pricer
            .present_value(&digital(FxOptionType::Call, PayLeg::Domestic), &market)
            .unwrap();
        assert_eq!(domestic.currency(), Currency::USD);
    }

    // ========================================
    // Greeks
    // ========================================

    #[test]
    fn test_forward_vega_and_driftless_theta() {
        let market = snapshot(0.655);
        let pricer = FxDigitalOptionPricer::new();
        let option = digital(FxOptionType::Call, PayLeg::Domestic);
        let df = market.discount_factor(Currency::USD, 0.6).unwrap();

        let vega = pricer.vega(&option, &market, true).unwrap();
        let forward_vega = pricer.forward_vega(&option, &market).unwrap();
        assert_eq!(forward_vega.convention, GreekConvention::forward(true));
        assert_relative_eq!(forward_vega.value * df, vega.value, max_relative = 1e-12);

        let forward = pricer.forward_fx_rate(&option, &market).unwrap();
        let sigma = pricer.implied_volatility(&option, &market).unwrap();
        let undiscounted = |t: f64| Digital::from_forward(forward, 0.66, t, sigma, 1.0).price(true);
        let h = 1e-5;
        let fd = -(undiscounted(0.6 + h) - undiscounted(0.6 - h)) / (2.0 * h) * 0.66;
        let theta = pricer.forward_driftless_theta(&option, &market).unwrap();
        assert_eq!(theta.kind, GreekKind::Theta);
        assert_relative_eq!(theta.value, fd, max_relative = 1e-6);

        // no zero rates needed
        let df_only = DiscountFactorSnapshot::new(market);
        assert!(pricer.forward_driftless_theta(&option, &df_only).is_ok());
    }

    #[test]
    fn test_delta_matches_bumped_spot() {
        let market = snapshot(0.655).with_surface(FxVolatilitySurface::flat(0.12));
        let pricer = FxDigitalOptionPricer::new();
        let option = digital(FxOptionType::Call, PayLeg::Domestic);
        let pv = |s: f64| {
            pricer
                .present_value(&option, &market.with_spot_rate(Currency::AUD, Currency::USD, s))
                .unwrap()
                .amount()
        };
        let h = 1e-5;
        let fd = (pv(0.655 + h) - pv(0.655 - h)) / (2.0 * h);
        let delta = pricer.delta(&option, &market, true).unwrap();
        assert_relative_eq!(delta.amount().amount(), fd, max_relative = 1e-6);
        assert_eq!(delta.currency, Currency::USD);
    }

    #[test]
    fn test_rate_greeks_need_zero_rates() {
        let market = DiscountFactorSnapshot::new(snapshot(0.655));
        let pricer = FxDigitalOptionPricer::new();
        let option = digital(FxOptionType::Put, PayLeg::Domestic);
        assert!(pricer.present_value(&option, &market).is_ok());
        assert!(pricer.vega(&option, &market, true).is_ok());
        assert!(pricer.currency_exposure(&option, &market).is_ok());
        assert!(pricer.curve_sensitivities(&option, &market).is_ok());
        for kind in [GreekKind::Delta, GreekKind::Gamma, GreekKind::Theta, GreekKind::Vanna, GreekKind::Vomma] {
            let err = pricer.greek(kind, &option, &market, true).unwrap_err();
            assert!(err.is_unsupported_shape(), "{kind}: {err}");
        }

        let result = pricer.price_with_greeks(&option, &market, true).unwrap();
        assert_eq!(result.greeks.len(), 1);
        assert_eq!(result.greeks[0].kind, GreekKind::Vega);
    }

    // ========================================
    // Curve sensitivities
    // ========================================

    #[test]
    fn test_curve_sensitivities_match_bumped_curves() {
        let market = snapshot(0.655).with_surface(FxVolatilitySurface::flat(0.12));
        let pricer = FxDigitalOptionPricer::new();
        let option = digital(FxOptionType::Put, PayLeg::Foreign);
        let sensitivities = pricer.curve_sensitivities(&option, &market).unwrap();
        // pay leg is AUD, so the "other" curve is USD
        assert_eq!(sensitivities[0].curve_name, "USD-SOFR");
        assert_eq!(sensitivities[1].curve_name, "AUD-AONIA");

        let h = 1e-6;
        let pv = |ccy: Currency, r: f64| {
            pricer
                .present_value(&option, &market.with_curve(ccy, FlatCurve::new(r)))
                .unwrap()
                .amount()
        };
        let fd_usd = (pv(Currency::USD, 0.045 + h) - pv(Currency::USD, 0.045 - h)) / (2.0 * h);
        let fd_aud = (pv(Currency::AUD, 0.04 + h) - pv(Currency::AUD, 0.04 - h)) / (2.0 * h);
        assert_relative_eq!(sensitivities[0].value, fd_usd, max_relative = 1e-5);
        assert_relative_eq!(sensitivities[1].value, fd_aud, max_relative = 1e-5);
    }
}
