//! FX option pricers, one per contract family.
//!
//! Every pricer implements [`FxOptionPricer`]:
//!
//! | Pricer | Price | Closed-form gamma |
//! |--------|-------|-------------------|
//! | [`FxVanillaOptionPricer`] | Garman–Kohlhagen | yes |
//! | [`FxAmericanOptionPricer`] | Bjerksund–Stensland 2002 | no |
//! | [`FxDigitalOptionPricer`] | cash-or-nothing | yes |
//! | [`FxBarrierOptionPricer`] | Reiner–Rubinstein with rebate | no |
//!
//! Greeks are per unit of notional with the position sign applied. Every
//! operation first checks that the option's pair is served by the
//! snapshot's volatility surface.

mod american;
mod barrier;
mod digital;
mod vanilla;

pub use american::FxAmericanOptionPricer;
pub use barrier::FxBarrierOptionPricer;
pub use digital::FxDigitalOptionPricer;
pub use vanilla::FxVanillaOptionPricer;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{Currency, CurrencyAmount, PricingError};
use pricer_models::instruments::fx::FxOptionTerms;
use tracing::debug;

use crate::exposure::{
    forward_delta_from_spot, forward_gamma_from_spot, relative_delta_spot, relative_gamma_spot,
};
use crate::forward::ForwardRates;
use crate::result::{
    CurrencyExposure, CurveSensitivity, Greek, GreekConvention, GreekKind, PricingResult,
    VolatilityNodeSensitivities,
};

/// Valuation and risk of one FX option family.
pub trait FxOptionPricer: Send + Sync {
    /// Contract type priced.
    type Contract;

    /// Spot, forward and rates in the orientation the option is priced in.
    fn forward_rates<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<ForwardRates, PricingError>;

    /// Present value.
    fn present_value<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<CurrencyAmount, PricingError>;

    /// Present value split into the two currencies.
    fn currency_exposure<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<CurrencyExposure, PricingError>;

    /// Spot delta.
    fn delta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError>;

    /// Spot gamma.
    fn gamma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError>;

    /// Vega. The quote flag only tags the result.
    fn vega<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError>;

    /// Theta. The quote flag only tags the result.
    fn theta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError>;

    /// Vanna.
    fn vanna<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError>;

    /// Vomma. The quote flag only tags the result.
    fn vomma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError>;

    /// Zero-rate sensitivities at the payment time.
    fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<Vec<CurveSensitivity>, PricingError>;

    /// Vega bucketed onto the volatility surface grid.
    fn volatility_node_sensitivities<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<VolatilityNodeSensitivities, PricingError>;

    /// Volatility used to price.
    fn implied_volatility<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<f64, PricingError>;

    /// Whether gamma is analytic rather than a bumped delta.
    fn has_closed_form_gamma(&self) -> bool;

    /// Forward FX rate at the payment time.
    fn forward_fx_rate<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<f64, PricingError> {
        Ok(self.forward_rates(option, snapshot)?.forward)
    }

    /// Delta against the forward, `δ_spot / df_foreign`.
    fn forward_delta<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<Greek, PricingError> {
        let delta = self.delta(option, snapshot, true)?;
        let rates = self.forward_rates(option, snapshot)?;
        Ok(Greek {
            value: forward_delta_from_spot(delta.value, rates.df_foreign),
            convention: GreekConvention::forward(true),
            ..delta
        })
    }

    /// Gamma against the forward, `γ_spot · df_domestic / df_foreign²`.
    fn forward_gamma<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
    ) -> Result<Greek, PricingError> {
        let gamma = self.gamma(option, snapshot, true)?;
        let rates = self.forward_rates(option, snapshot)?;
        Ok(Greek {
            value: forward_gamma_from_spot(gamma.value, rates.df_domestic, rates.df_foreign),
            convention: GreekConvention::forward(true),
            ..gamma
        })
    }

    /// Delta to a relative move of the quoted spot.
    fn delta_relative_spot<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let delta = self.delta(option, snapshot, true)?;
        let spot = self.forward_rates(option, snapshot)?.spot;
        Ok(Greek {
            value: relative_delta_spot(delta.value, spot, direct_quote),
            convention: GreekConvention::spot(direct_quote),
            ..delta
        })
    }

    /// Gamma to a relative move of the quoted spot.
    fn gamma_relative_spot<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        let delta = self.delta(option, snapshot, true)?;
        let gamma = self.gamma(option, snapshot, true)?;
        let spot = self.forward_rates(option, snapshot)?.spot;
        Ok(Greek {
            value: relative_gamma_spot(gamma.value, delta.value, spot, direct_quote),
            convention: GreekConvention::spot(direct_quote),
            ..gamma
        })
    }

    /// One Greek by kind.
    fn greek<S: MarketSnapshot + ?Sized>(
        &self,
        kind: GreekKind,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<Greek, PricingError> {
        match kind {
            GreekKind::Delta => self.delta(option, snapshot, direct_quote),
            GreekKind::Gamma => self.gamma(option, snapshot, direct_quote),
            GreekKind::Vega => self.vega(option, snapshot, direct_quote),
            GreekKind::Theta => self.theta(option, snapshot, direct_quote),
            GreekKind::Vanna => self.vanna(option, snapshot, direct_quote),
            GreekKind::Vomma => self.vomma(option, snapshot, direct_quote),
        }
    }

    /// Present value, exposure, Greeks and bucketed sensitivities.
    ///
    /// Greeks the snapshot cannot support (zero rates missing) are left
    /// out. Any other failure aborts the valuation.
    fn price_with_greeks<S: MarketSnapshot + ?Sized>(
        &self,
        option: &Self::Contract,
        snapshot: &S,
        direct_quote: bool,
    ) -> Result<PricingResult, PricingError> {
        let mut result = PricingResult::new(self.present_value(option, snapshot)?);
        result.currency_exposure = Some(self.currency_exposure(option, snapshot)?);
        for kind in GreekKind::ALL {
            match self.greek(kind, option, snapshot, direct_quote) {
                Ok(greek) => result.greeks.push(greek),
                Err(e) if e.is_unsupported_shape() => {
                    debug!(greek = %kind, error = %e, "greek skipped");
                }
                Err(e) => return Err(e),
            }
        }
        result.curve_sensitivities = self.curve_sensitivities(option, snapshot)?;
        result.volatility_node_sensitivities =
            Some(self.volatility_node_sensitivities(option, snapshot)?);
        Ok(result)
    }
}

/// Fails unless the snapshot's surface serves `foreign/domestic`.
pub(crate) fn check_currencies<S: MarketSnapshot + ?Sized>(
    snapshot: &S,
    foreign: Currency,
    domestic: Currency,
) -> Result<(), PricingError> {
    if snapshot.check_currencies(foreign, domestic) {
        Ok(())
    } else {
        Err(PricingError::InvalidArgument(format!(
            "option currencies {}/{} not compatible with smile data {}",
            foreign,
            domestic,
            snapshot.currency_pair()
        )))
    }
}

/// [`check_currencies`] for the option's own pair.
pub(crate) fn check_terms<S: MarketSnapshot + ?Sized>(
    snapshot: &S,
    terms: &FxOptionTerms,
) -> Result<(), PricingError> {
    check_currencies(snapshot, terms.foreign_currency(), terms.domestic_currency())
}

/// Centered difference `(up − down) / (2h)`.
#[inline]
pub(crate) fn central_difference(up: f64, down: f64, h: f64) -> f64 {
    (up - down) / (2.0 * h)
}
