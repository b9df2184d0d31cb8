//! Forward FX rate and zero rates derived from discount factors.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{Currency, PricingError};

/// Continuously compounded zero rate implied by a discount factor,
/// `−ln(df)/t`.
///
/// `t = 0` is not guarded and yields NaN or infinity.
#[inline]
pub fn zero_rate_from_discount_factor(discount_factor: f64, time: f64) -> f64 {
    -discount_factor.ln() / time
}

/// Spot, forward, discount factors and zero rates at one payment time.
///
/// # Examples
///
/// ```
/// use pricer_risk::forward::ForwardRates;
///
/// let rates = ForwardRates::derive(1.2, 0.97, 0.99, 1.0);
/// assert!((rates.forward - 1.2 * 0.99 / 0.97).abs() < 1e-15);
/// assert!((rates.rate_domestic + 0.97_f64.ln()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardRates {
    /// Spot rate, domestic per foreign.
    pub spot: f64,
    /// Forward rate, `spot · df_foreign / df_domestic`.
    pub forward: f64,
    /// Domestic discount factor.
    pub df_domestic: f64,
    /// Foreign discount factor.
    pub df_foreign: f64,
    /// Domestic zero rate.
    pub rate_domestic: f64,
    /// Foreign zero rate.
    pub rate_foreign: f64,
    /// Time the factors refer to.
    pub time: f64,
}

impl ForwardRates {
    /// Derives the forward and zero rates.
    pub fn derive(spot: f64, df_domestic: f64, df_foreign: f64, time: f64) -> Self {
        Self {
            spot,
            forward: spot * df_foreign / df_domestic,
            df_domestic,
            df_foreign,
            rate_domestic: zero_rate_from_discount_factor(df_domestic, time),
            rate_foreign: zero_rate_from_discount_factor(df_foreign, time),
            time,
        }
    }

    /// Reads spot and discount factors for `foreign/domestic` from a
    /// snapshot.
    pub fn from_snapshot<S: MarketSnapshot + ?Sized>(
        snapshot: &S,
        foreign: Currency,
        domestic: Currency,
        payment_time: f64,
    ) -> Result<Self, PricingError> {
        let df_domestic = snapshot.discount_factor(domestic, payment_time)?;
        let df_foreign = snapshot.discount_factor(foreign, payment_time)?;
        let spot = snapshot.spot_rate(foreign, domestic)?;
        Ok(Self::derive(spot, df_domestic, df_foreign, payment_time))
    }

    /// Cost of carry `rate_domestic − rate_foreign`.
    #[inline]
    pub fn cost_of_carry(&self) -> f64 {
        self.rate_domestic - self.rate_foreign
    }

    /// Backward sweep from the forward and the discounted price to the zero
    /// rates.
    ///
    /// `forward_bar` is `∂V/∂F` and `price` the discounted value it belongs
    /// to. Returns `(∂V/∂r_domestic, ∂V/∂r_foreign)`.
    pub fn rate_adjoints(&self, forward_bar: f64, price: f64) -> (f64, f64) {
        let df_foreign_bar = self.spot / self.df_domestic * forward_bar;
        let df_domestic_bar = -self.spot / (self.df_domestic * self.df_domestic)
            * self.df_foreign
            * forward_bar
            + price / self.df_domestic;
        (
            -self.time * self.df_domestic * df_domestic_bar,
            -self.time * self.df_foreign * df_foreign_bar,
        )
    }
}
