//! European FX vanilla pricer (Garman–Kohlhagen).
//!
//! The option is priced with the Black formula on the forward at the
//! payment time, discounted with the domestic curve. All Greeks come from
//! the exact Black adjoint:
//!
//! ```text
//! Δ_spot = df_f · ω N(ω d1)
//! Γ_spot = φ(d1)/(Fσ√T) · df_f²/df_d
//! vanna  = −df_f · φ(d1) d2/σ
//! θ      = −F φ(d1) σ/(2√T)        (driftless, undiscounted)
//! ```

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::analytical::{Black, BlackPriceAdjoint};
use pricer_models::instruments::fx::{FxOptionTerms, FxVanillaOption};
use tracing::debug;

use super::{check_terms, FxOptionPricer};
use crate::bucketing;
use crate::exposure::{currency_exposure, relative_delta, relative_gamma, relative_vanna};
use crate::forward::ForwardRates;
use crate::result::{
    CurrencyExposure, CurveSensitivity, Greek, GreekConvention, GreekKind, SensitivityMethod,
    VolatilityNodeSensitivities,
};

/// Pricer for [`FxVanillaOption`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::market_data::snapshot::CurveMarketSnapshot;
/// use pricer_core::market_data::surfaces::FxVolatilitySurface;
/// use pricer_core::types::{Currency, CurrencyPair};
/// use pricer_models::instruments::fx::{FxOptionTerms, FxOptionType, FxVanillaOption, PositionSide};
/// use pricer_risk::pricers::{FxOptionPricer, FxVanillaOptionPricer};
///
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// let snapshot = CurveMarketSnapshot::builder(pair)
///     .spot_rate(Currency::EUR, Currency::USD, 1.2)
///     .curve(Currency::EUR, "EUR", FlatCurve::new(0.0))
///     .curve(Currency::USD, "USD", FlatCurve::new(0.0))
///     .surface(FxVolatilitySurface::flat(0.1))
///     .build()
///     .unwrap();
/// let terms = FxOptionTerms::new(pair, 1.2, 1.0, 1.0, 1e6, FxOptionType::Call, PositionSide::Long).unwrap();
/// let option = FxVanillaOption::new(terms);
///
/// let pv = FxVanillaOptionPricer::new().present_value(&option, &snapshot).unwrap();
/// assert_eq!(pv.currency(), Currency::USD);
/// assert!((pv.amount() - 47_860.0).abs() < 10.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FxVanillaOptionPricer;

/// Everything one Black evaluation yields.
struct Valuation {
    terms: FxOptionTerms,
    rates: ForwardRates,
    volatility: f64,
    black: Black,
    adjoint: BlackPriceAdjoint,
}

impl Valuation {
    fn spot_delta(&self) -> f64 {
        self.adjoint.d_forward * self.rates.df_foreign / self.rates.df_domestic
    }

    fn spot_gamma(&self) -> f64 {
        let ratio = self.rates.df_foreign / self.rates.df_domestic;
        self.adjoint.d2_forward * ratio * ratio
    }

    fn spot_vanna(&self) -> f64 {
        self.adjoint.d2_forward_vol * self.rates.df_foreign / self.rates.df_domestic
    }

    fn present_value(&self) -> f64 {
        self.adjoint.price * self.terms.abs_notional() * self.terms.sign()
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

impl FxVanillaOptionPricer {
    /// Creates the pricer.
    pub fn new() -> Self {
        Self
    }

    fn value<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
    ) -> Result<Valuation, PricingError> {
        let terms = *option.terms();
        check_terms(snapshot, &terms)?;
        let rates = ForwardRates::from_snapshot(
            snapshot,
            terms.foreign_currency(),
            terms.domestic_currency(),
            terms.payment_time(),
        )?;
        let volatility = snapshot.volatility(
            terms.foreign_currency(),
            terms.domestic_currency(),
            terms.expiry(),
            terms.strike(),
            rates.forward,
        )?;
        let black = Black::new(
            rates.forward,
            terms.strike(),
            terms.expiry(),
            volatility,
            rates.df_domestic,
        );
        let adjoint = black.adjoint(terms.is_call());
        debug!(
            family = "vanilla",
            forward = rates.forward,
            volatility,
            price = adjoint.price,
            "black price"
        );
        Ok(Valuation {
            terms,
            rates,
            volatility,
            black,
            adjoint,
        })
    }
}

impl FxOptionPricer for FxVanillaOptionPricer {
    type Contract = FxVanillaOption;

    fn forward_rates<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
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
        option: &FxVanillaOption,
        snapshot: &S,
    ) -> Result<CurrencyAmount, PricingError> {
        let v = self.value(option, snapshot)?;
        Ok(CurrencyAmount::new(v.terms.domestic_currency(), v.present_value()))
    }

    fn currency_exposure<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
    ) -> Result<CurrencyExposure, PricingError> {
        let v = self.value(option, snapshot)?;
        Ok(currency_exposure(
            v.terms.foreign_currency(),
            v.terms.domestic_currency(),
            v.spot_delta(),
            v.terms.notional(),
            v.terms.sign(),
            v.rates.spot,
            v.present_value(),
        ))
    }

    fn delta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let v = self.value(option, snapshot)?;
        let value = relative_delta(v.spot_delta(), v.rates.spot, direct_quote);
        Ok(v.greek(GreekKind::Delta, value, direct_quote, SensitivityMethod::Adjoint))
    }

    fn gamma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let v = self.value(option, snapshot)?;
        let value = relative_gamma(v.spot_gamma(), v.spot_delta(), v.rates.spot, direct_quote);
        Ok(v.greek(GreekKind::Gamma, value, direct_quote, SensitivityMethod::Adjoint))
    }

    fn vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let v = self.value(option, snapshot)?;
        Ok(v.greek(GreekKind::Vega, v.adjoint.d_vol, direct_quote, SensitivityMethod::Adjoint))
    }

    fn theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let v = self.value(option, snapshot)?;
        let theta = v.black.driftless_theta();
        Ok(v.greek(GreekKind::Theta, theta, direct_quote, SensitivityMethod::ClosedForm))
    }

    fn vanna<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let v = self.value(option, snapshot)?;
        let value = relative_vanna(v.spot_vanna(), v.rates.spot, direct_quote);
        Ok(v.greek(GreekKind::Vanna, value, direct_quote, SensitivityMethod::Adjoint))
    }

    fn vomma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let v = self.value(option, snapshot)?;
        Ok(v.greek(GreekKind::Vomma, v.adjoint.d2_vol, direct_quote, SensitivityMethod::Adjoint))
    }

    fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
    ) -> Result<Vec<CurveSensitivity>, PricingError> {
        let v = self.value(option, snapshot)?;
        let (r_domestic, r_foreign) = v.rates.rate_adjoints(v.adjoint.d_forward, v.adjoint.price);
        let scale = v.terms.abs_notional() * v.terms.sign();
        let time = v.terms.payment_time();
        bucketing::curve_sensitivities(
            snapshot,
            &[
                (v.terms.foreign_currency(), time, r_foreign * scale),
                (v.terms.domestic_currency(), time, r_domestic * scale),
            ],
        )
    }

    fn volatility_node_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
    ) -> Result<VolatilityNodeSensitivities, PricingError> {
        let v = self.value(option, snapshot)?;
        let (_, weights) = snapshot.volatility_with_node_sensitivities(
            v.terms.foreign_currency(),
            v.terms.domestic_currency(),
            v.terms.expiry(),
            v.terms.strike(),
            v.rates.forward,
        )?;
        let point_vega = v.adjoint.d_vol * v.terms.abs_notional() * v.terms.sign();
        Ok(bucketing::volatility_node_sensitivities(
            snapshot.currency_pair(),
            point_vega,
            &weights,
        ))
    }

    fn implied_volatility<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxVanillaOption,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        Ok(self.value(option, snapshot)?.volatility)
    }

    fn has_closed_form_gamma(&self) -> bool {
        true
    }
}
