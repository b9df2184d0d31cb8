//! American FX vanilla pricer (Bjerksund–Stensland 2002).
//!
//! The model takes the domestic rate `r` and the cost of carry
//! `b = r_domestic − r_foreign`, both derived from discount factors at the
//! payment time. Delta and vega are exact dual-number derivatives; gamma,
//! vanna, vomma and theta bump the model with the shifts of
//! [`FiniteDifferenceConfig`].

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::analytical::{bjerksund_stensland_adjoint, bjerksund_stensland_price, AmericanPriceAdjoint};
use pricer_models::instruments::fx::{FxAmericanOption, FxOptionTerms};
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

/// Pricer for [`FxAmericanOption`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FxAmericanOptionPricer {
    config: FiniteDifferenceConfig,
}

/// Market inputs of one American valuation.
struct Inputs {
    terms: FxOptionTerms,
    rates: ForwardRates,
    volatility: f64,
}

impl Inputs {
    fn adjoint_at(&self, spot: f64, expiry: f64, volatility: f64) -> AmericanPriceAdjoint {
        bjerksund_stensland_adjoint(
            spot,
            self.terms.strike(),
            self.rates.rate_domestic,
            self.rates.cost_of_carry(),
            expiry,
            volatility,
            self.terms.is_call(),
        )
    }

    fn price_at(&self, expiry: f64) -> f64 {
        bjerksund_stensland_price(
            self.rates.spot,
            self.terms.strike(),
            self.rates.rate_domestic,
            self.rates.cost_of_carry(),
            expiry,
            self.volatility,
            self.terms.is_call(),
        )
    }

    fn adjoint(&self) -> AmericanPriceAdjoint {
        self.adjoint_at(self.rates.spot, self.terms.expiry(), self.volatility)
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

impl FxAmericanOptionPricer {
    /// Creates a pricer with the given shifts.
    pub fn new(config: FiniteDifferenceConfig) -> Self {
        Self { config }
    }

    /// Shifts used by the bumped Greeks.
    pub fn config(&self) -> &FiniteDifferenceConfig {
        &self.config
    }

    fn inputs<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
    ) -> Result<Inputs, PricingError> {
        let terms = *option.terms();
        let rates = self.forward_rates(option, snapshot)?;
        let volatility = snapshot.volatility(
            terms.foreign_currency(),
            terms.domestic_currency(),
            terms.expiry(),
            terms.strike(),
            rates.forward,
        )?;
        Ok(Inputs {
            terms,
            rates,
            volatility,
        })
    }

    /// Unsigned spot delta and gamma per unit notional.
    fn spot_delta_gamma(&self, inputs: &Inputs) -> (f64, f64) {
        let s = inputs.rates.spot;
        let t = inputs.terms.expiry();
        let h = self.config.gamma_shift();
        let up = inputs.adjoint_at(s * (1.0 + h), t, inputs.volatility).d_spot;
        let down = inputs.adjoint_at(s * (1.0 - h), t, inputs.volatility).d_spot;
        trace!(family = "american", shift = h, up, down, "gamma bump");
        let delta = inputs.adjoint().d_spot;
        (delta, central_difference(up, down, h * s))
    }
}

impl FxOptionPricer for FxAmericanOptionPricer {
    type Contract = FxAmericanOption;

    fn forward_rates<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
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
        option: &FxAmericanOption,
        snapshot: &S,
    ) -> Result<CurrencyAmount, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let price = inputs.price_at(inputs.terms.expiry());
        debug!(
            family = "american",
            forward = inputs.rates.forward,
            volatility = inputs.volatility,
            price,
            "bjerksund-stensland price"
        );
        Ok(CurrencyAmount::new(
            inputs.terms.domestic_currency(),
            price * inputs.scale(),
        ))
    }

    fn currency_exposure<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
    ) -> Result<CurrencyExposure, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let adjoint = inputs.adjoint();
        Ok(currency_exposure(
            inputs.terms.foreign_currency(),
            inputs.terms.domestic_currency(),
            adjoint.d_spot,
            inputs.terms.notional(),
            inputs.terms.sign(),
            inputs.rates.spot,
            adjoint.price * inputs.scale(),
        ))
    }

    fn delta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let value = relative_delta(inputs.adjoint().d_spot, inputs.rates.spot, direct_quote);
        Ok(inputs.greek(GreekKind::Delta, value, direct_quote, SensitivityMethod::Adjoint))
    }

    fn gamma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let (delta, gamma) = self.spot_delta_gamma(&inputs);
        let value = relative_gamma(gamma, delta, inputs.rates.spot, direct_quote);
        Ok(inputs.greek(GreekKind::Gamma, value, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let vega = inputs.adjoint().d_vol;
        Ok(inputs.greek(GreekKind::Vega, vega, direct_quote, SensitivityMethod::Adjoint))
    }

    fn theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let dt = self.config.american_theta_shift();
        let t = inputs.terms.expiry();
        let now = inputs.price_at(t);
        let theta = if t > dt {
            let later = inputs.price_at(t - dt);
            trace!(family = "american", shift = dt, now, later, "theta bump");
            (later - now) / dt
        } else {
            // inside the last shift: bump away from expiry instead
            let earlier = inputs.price_at(t + dt);
            trace!(family = "american", shift = dt, now, earlier, "one-sided theta bump");
            (now - earlier) / dt
        };
        Ok(inputs.greek(GreekKind::Theta, theta, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn vanna<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let s = inputs.rates.spot;
        let t = inputs.terms.expiry();
        let h = self.config.vanna_shift();
        let up = inputs.adjoint_at(s * (1.0 + h), t, inputs.volatility).d_vol;
        let down = inputs.adjoint_at(s * (1.0 - h), t, inputs.volatility).d_vol;
        trace!(family = "american", shift = h, up, down, "vanna bump");
        let value = relative_vanna(central_difference(up, down, h * s), s, direct_quote);
        Ok(inputs.greek(GreekKind::Vanna, value, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn vomma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let s = inputs.rates.spot;
        let t = inputs.terms.expiry();
        let sigma = inputs.volatility;
        let h = self.config.vomma_shift();
        let up = inputs.adjoint_at(s, t, sigma * (1.0 + h)).d_vol;
        let down = inputs.adjoint_at(s, t, sigma * (1.0 - h)).d_vol;
        trace!(family = "american", shift = h, up, down, "vomma bump");
        let vomma = central_difference(up, down, h * sigma);
        Ok(inputs.greek(GreekKind::Vomma, vomma, direct_quote, SensitivityMethod::FiniteDifference))
    }

    fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
    ) -> Result<Vec<CurveSensitivity>, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let adjoint = inputs.adjoint();
        let (domestic, foreign) = carry_chain_rule(adjoint.d_rate, adjoint.d_carry);
        let scale = inputs.scale();
        let time = inputs.terms.payment_time();
        bucketing::curve_sensitivities(
            snapshot,
            &[
                (inputs.terms.foreign_currency(), time, foreign * scale),
                (inputs.terms.domestic_currency(), time, domestic * scale),
            ],
        )
    }

    fn volatility_node_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
    ) -> Result<VolatilityNodeSensitivities, PricingError> {
        let inputs = self.inputs(option, snapshot)?;
        let (_, weights) = snapshot.volatility_with_node_sensitivities(
            inputs.terms.foreign_currency(),
            inputs.terms.domestic_currency(),
            inputs.terms.expiry(),
            inputs.terms.strike(),
            inputs.rates.forward,
        )?;
        let point_vega = inputs.adjoint().d_vol * inputs.scale();
        Ok(bucketing::volatility_node_sensitivities(
            snapshot.currency_pair(),
            point_vega,
            &weights,
        ))
    }

    fn implied_volatility<S: MarketSnapshot + ?Sized>(
        &self,
        option: &FxAmericanOption,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        Ok(self.inputs(option, snapshot)?.volatility)
    }

    fn has_closed_form_gamma(&self) -> bool {
        false
    }
}
