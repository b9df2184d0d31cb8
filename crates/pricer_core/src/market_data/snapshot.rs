//! Market snapshots consumed by FX option pricers.
//!
//! A snapshot is an immutable view of the market for one valuation: discount
//! curves per currency, spot FX rates and one volatility surface quoted in a
//! reference currency pair.
//!
//! This module provides:
//! - [`MarketSnapshot`]: The read-only market data interface
//! - [`CurveMarketSnapshot`]: In-memory snapshot backed by rate curves
//! - [`CurveMarketSnapshotBuilder`]: Validating builder for it
//! - [`DiscountFactorSnapshot`]: Wrapper that hides zero rates

use std::collections::HashMap;

use super::curves::{DiscountCurve, YieldCurve};
use super::error::MarketDataError;
use super::surfaces::{FxVolatilitySurface, SurfaceNodeWeights, VolatilitySurface};
use crate::types::{Currency, CurrencyPair, PricingError};

/// Read-only market data for FX option valuation.
///
/// All times are year fractions from the valuation date. Spot rates follow
/// `spot_rate(a, b) == 1 / spot_rate(b, a)` and `spot_rate(a, a) == 1`.
///
/// Volatility lookups take the option's own currency order. When that order
/// is the inverse of [`MarketSnapshot::currency_pair`] the strike and
/// forward are inverted before the surface is queried.
pub trait MarketSnapshot: Send + Sync {
    /// Discount factor for `currency` at `time`.
    fn discount_factor(&self, currency: Currency, time: f64) -> Result<f64, PricingError>;

    /// Units of `quote` per unit of `base`.
    fn spot_rate(&self, base: Currency, quote: Currency) -> Result<f64, PricingError>;

    /// Implied volatility for an option on `base/quote`.
    fn volatility(
        &self,
        base: Currency,
        quote: Currency,
        expiry: f64,
        strike: f64,
        forward: f64,
    ) -> Result<f64, PricingError> {
        self.volatility_with_node_sensitivities(base, quote, expiry, strike, forward)
            .map(|(vol, _)| vol)
    }

    /// Implied volatility plus the interpolation weight of each surface node.
    fn volatility_with_node_sensitivities(
        &self,
        base: Currency,
        quote: Currency,
        expiry: f64,
        strike: f64,
        forward: f64,
    ) -> Result<(f64, SurfaceNodeWeights<f64>), PricingError>;

    /// Name of the discount curve used for `currency`.
    fn curve_name(&self, currency: Currency) -> Result<String, PricingError>;

    /// The pair the volatility surface is quoted in.
    fn currency_pair(&self) -> CurrencyPair;

    /// Continuously compounded zero rate for `currency` at `time`.
    ///
    /// # Errors
    ///
    /// The default implementation always fails with
    /// `PricingError::UnsupportedMarketDataShape`.
    fn zero_rate(&self, currency: Currency, time: f64) -> Result<f64, PricingError> {
        let _ = time;
        Err(PricingError::UnsupportedMarketDataShape(format!(
            "zero rates for {} are not available from a discount-factor-only snapshot",
            currency
        )))
    }

    /// True when `ccy1/ccy2` matches the surface pair in either orientation.
    fn check_currencies(&self, ccy1: Currency, ccy2: Currency) -> bool {
        let pair = self.currency_pair();
        (pair.base() == ccy1 && pair.quote() == ccy2)
            || (pair.base() == ccy2 && pair.quote() == ccy1)
    }
}

/// Inverts strike and forward when the query pair is the inverse of the
/// surface pair. Fails for pairs the surface does not cover.
fn surface_coordinates(
    surface_pair: CurrencyPair,
    base: Currency,
    quote: Currency,
    strike: f64,
    forward: f64,
) -> Result<(f64, f64), PricingError> {
    if surface_pair.base() == base && surface_pair.quote() == quote {
        Ok((strike, forward))
    } else if surface_pair.base() == quote && surface_pair.quote() == base {
        Ok((1.0 / strike, 1.0 / forward))
    } else {
        Err(PricingError::InvalidArgument(format!(
            "option currencies {}/{} not compatible with smile data {}",
            base, quote, surface_pair
        )))
    }
}

#[derive(Debug, Clone)]
struct NamedCurve {
    name: String,
    curve: DiscountCurve<f64>,
}

/// In-memory snapshot backed by discount curves.
///
/// Supports every [`MarketSnapshot`] query including zero rates.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::market_data::snapshot::{CurveMarketSnapshot, MarketSnapshot};
/// use pricer_core::market_data::surfaces::FxVolatilitySurface;
/// use pricer_core::types::{Currency, CurrencyPair};
///
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// let snapshot = CurveMarketSnapshot::builder(pair)
///     .spot_rate(Currency::EUR, Currency::USD, 1.2)
///     .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(0.02))
///     .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.04))
///     .surface(FxVolatilitySurface::flat(0.1))
///     .build()
///     .unwrap();
///
/// assert!((snapshot.spot_rate(Currency::USD, Currency::EUR).unwrap() - 1.0 / 1.2).abs() < 1e-15);
/// assert_eq!(snapshot.curve_name(Currency::USD).unwrap(), "USD-SOFR");
/// assert!((snapshot.zero_rate(Currency::EUR, 1.0).unwrap() - 0.02).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct CurveMarketSnapshot {
    pair: CurrencyPair,
    spots: HashMap<(Currency, Currency), f64>,
    curves: HashMap<Currency, NamedCurve>,
    surface: FxVolatilitySurface<f64>,
}

impl CurveMarketSnapshot {
    /// Starts a builder for a snapshot whose surface is quoted in `pair`.
    pub fn builder(pair: CurrencyPair) -> CurveMarketSnapshotBuilder {
        CurveMarketSnapshotBuilder::new(pair)
    }

    /// The volatility surface.
    pub fn surface(&self) -> &FxVolatilitySurface<f64> {
        &self.surface
    }

    /// The curve held for `currency`.
    pub fn curve(&self, currency: Currency) -> Result<&DiscountCurve<f64>, PricingError> {
        self.curves
            .get(&currency)
            .map(|named| &named.curve)
            .ok_or_else(|| MarketDataError::MissingCurve(currency).into())
    }

    /// Copy with one spot rate replaced. Used for bumped revaluation.
    pub fn with_spot_rate(&self, base: Currency, quote: Currency, rate: f64) -> Self {
        let mut bumped = self.clone();
        bumped.spots.remove(&(quote, base));
        bumped.spots.insert((base, quote), rate);
        bumped
    }

    /// Copy with the curve for `currency` replaced, keeping its name.
    pub fn with_curve(&self, currency: Currency, curve: impl Into<DiscountCurve<f64>>) -> Self {
        let mut bumped = self.clone();
        let name = self
            .curves
            .get(&currency)
            .map(|named| named.name.clone())
            .unwrap_or_else(|| format!("{}-DISCOUNT", currency));
        bumped.curves.insert(
            currency,
            NamedCurve {
                name,
                curve: curve.into(),
            },
        );
        bumped
    }

    /// Copy with the volatility surface replaced.
    pub fn with_surface(&self, surface: FxVolatilitySurface<f64>) -> Self {
        let mut bumped = self.clone();
        bumped.surface = surface;
        bumped
    }
}

impl MarketSnapshot for CurveMarketSnapshot {
    fn discount_factor(&self, currency: Currency, time: f64) -> Result<f64, PricingError> {
        Ok(self.curve(currency)?.discount_factor(time)?)
    }

    fn spot_rate(&self, base: Currency, quote: Currency) -> Result<f64, PricingError> {
        if base == quote {
            return Ok(1.0);
        }
        if let Some(rate) = self.spots.get(&(base, quote)) {
            return Ok(*rate);
        }
        if let Some(rate) = self.spots.get(&(quote, base)) {
            return Ok(1.0 / rate);
        }
        Err(MarketDataError::MissingFxRate(base, quote).into())
    }

    fn volatility_with_node_sensitivities(
        &self,
        base: Currency,
        quote: Currency,
        expiry: f64,
        strike: f64,
        forward: f64,
    ) -> Result<(f64, SurfaceNodeWeights<f64>), PricingError> {
        let (strike, _forward) = surface_coordinates(self.pair, base, quote, strike, forward)?;
        Ok(self.surface.volatility_with_weights(strike, expiry)?)
    }

    fn volatility(
        &self,
        base: Currency,
        quote: Currency,
        expiry: f64,
        strike: f64,
        forward: f64,
    ) -> Result<f64, PricingError> {
        let (strike, _forward) = surface_coordinates(self.pair, base, quote, strike, forward)?;
        Ok(self.surface.volatility(strike, expiry)?)
    }

    fn curve_name(&self, currency: Currency) -> Result<String, PricingError> {
        self.curves
            .get(&currency)
            .map(|named| named.name.clone())
            .ok_or_else(|| MarketDataError::MissingCurve(currency).into())
    }

    fn currency_pair(&self) -> CurrencyPair {
        self.pair
    }

    fn zero_rate(&self, currency: Currency, time: f64) -> Result<f64, PricingError> {
        Ok(self.curve(currency)?.zero_rate(time)?)
    }
}

/// Builder for [`CurveMarketSnapshot`].
#[derive(Debug, Clone)]
pub struct CurveMarketSnapshotBuilder {
    pair: CurrencyPair,
    spots: HashMap<(Currency, Currency), f64>,
    curves: HashMap<Currency, NamedCurve>,
    surface: Option<FxVolatilitySurface<f64>>,
}

impl CurveMarketSnapshotBuilder {
    fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            spots: HashMap::new(),
            curves: HashMap::new(),
            surface: None,
        }
    }

    /// Adds a spot rate: units of `quote` per unit of `base`.
    pub fn spot_rate(mut self, base: Currency, quote: Currency, rate: f64) -> Self {
        self.spots.insert((base, quote), rate);
        self
    }

    /// Adds the discount curve for `currency` under `name`.
    pub fn curve(
        mut self,
        currency: Currency,
        name: impl Into<String>,
        curve: impl Into<DiscountCurve<f64>>,
    ) -> Self {
        self.curves.insert(
            currency,
            NamedCurve {
                name: name.into(),
                curve: curve.into(),
            },
        );
        self
    }

    /// Sets the volatility surface, quoted in the builder's pair.
    pub fn surface(mut self, surface: FxVolatilitySurface<f64>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Validates and builds the snapshot.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidArgument` if the surface, a curve for either
    /// currency of the pair, or a spot rate for the pair is missing, or if a
    /// spot rate is not positive and finite.
    pub fn build(self) -> Result<CurveMarketSnapshot, PricingError> {
        let surface = self
            .surface
            .ok_or(MarketDataError::MissingVolatilitySurface(self.pair))?;
        for currency in [self.pair.base(), self.pair.quote()] {
            if !self.curves.contains_key(&currency) {
                return Err(MarketDataError::MissingCurve(currency).into());
            }
        }
        if let Some(((base, quote), _)) = self
            .spots
            .iter()
            .find(|(_, rate)| !(rate.is_finite() && **rate > 0.0))
        {
            return Err(PricingError::InvalidArgument(format!(
                "spot rate {}/{} must be positive",
                base, quote
            )));
        }

        let snapshot = CurveMarketSnapshot {
            pair: self.pair,
            spots: self.spots,
            curves: self.curves,
            surface,
        };
        snapshot.spot_rate(self.pair.base(), self.pair.quote())?;
        Ok(snapshot)
    }
}

/// Snapshot wrapper that exposes discount factors but no zero rates.
///
/// Models providers that only publish discount factors. Every query
/// delegates to the inner snapshot except [`MarketSnapshot::zero_rate`],
/// which keeps the failing default.
#[derive(Debug, Clone)]
pub struct DiscountFactorSnapshot<S> {
    inner: S,
}

impl<S: MarketSnapshot> DiscountFactorSnapshot<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped snapshot.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: MarketSnapshot> MarketSnapshot for DiscountFactorSnapshot<S> {
    fn discount_factor(&self, currency: Currency, time: f64) -> Result<f64, PricingError> {
        self.inner.discount_factor(currency, time)
    }

    fn spot_rate(&self, base: Currency, quote: Currency) -> Result<f64, PricingError> {
        self.inner.spot_rate(base, quote)
    }

    fn volatility_with_node_sensitivities(
        &self,
        base: Currency,
        quote: Currency,
        expiry: f64,
        strike: f64,
        forward: f64,
    ) -> Result<(f64, SurfaceNodeWeights<f64>), PricingError> {
        self.inner
            .volatility_with_node_sensitivities(base, quote, expiry, strike, forward)
    }

    fn volatility(
        &self,
        base: Currency,
        quote: Currency,
        expiry: f64,
        strike: f64,
        forward: f64,
    ) -> Result<f64, PricingError> {
        self.inner.volatility(base, quote, expiry, strike, forward)
    }

    fn curve_name(&self, currency: Currency) -> Result<String, PricingError> {
        self.inner.curve_name(currency)
    }

    fn currency_pair(&self) -> CurrencyPair {
        self.inner.currency_pair()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::FlatCurve;
    use approx::assert_relative_eq;

    fn eurusd() -> CurrencyPair {
        CurrencyPair::new(Currency::EUR, Currency::USD).unwrap()
    }

    fn snapshot() -> CurveMarketSnapshot {
        let surface = FxVolatilitySurface::new(
            &[0.5, 1.0],
            &[1.0, 1.25, 1.5],
            &[[0.12, 0.10, 0.11], [0.13, 0.11, 0.12]],
            true,
        )
        .unwrap();
        CurveMarketSnapshot::builder(eurusd())
            .spot_rate(Currency::EUR, Currency::USD, 1.25)
            .curve(Currency::EUR, "EUR-ESTR", FlatCurve::new(0.01))
            .curve(Currency::USD, "USD-SOFR", FlatCurve::new(0.03))
            .surface(surface)
            .build()
            .unwrap()
    }

    // ========================================
    // Builder Tests
    // ========================================

    #[test]
    fn test_build_requires_surface() {
        let result = CurveMarketSnapshot::builder(eurusd())
            .spot_rate(Currency::EUR, Currency::USD, 1.25)
            .curve(Currency::EUR, "EUR", FlatCurve::new(0.01))
            .curve(Currency::USD, "USD", FlatCurve::new(0.03))
            .build();
        assert!(matches!(result, Err(PricingError::InvalidArgument(_))));
    }

    #[test]
    fn test_build_requires_curves_and_spot() {
        let no_curve = CurveMarketSnapshot::builder(eurusd())
            .spot_rate(Currency::EUR, Currency::USD, 1.25)
            .curve(Currency::EUR, "EUR", FlatCurve::new(0.01))
            .surface(FxVolatilitySurface::flat(0.1))
            .build();
        assert!(matches!(no_curve, Err(PricingError::InvalidArgument(_))));

        let no_spot = CurveMarketSnapshot::builder(eurusd())
            .curve(Currency::EUR, "EUR", FlatCurve::new(0.01))
            .curve(Currency::USD, "USD", FlatCurve::new(0.03))
            .surface(FxVolatilitySurface::flat(0.1))
            .build();
        assert!(matches!(no_spot, Err(PricingError::InvalidArgument(_))));
    }

    #[test]
    fn test_build_rejects_non_positive_spot() {
        let result = CurveMarketSnapshot::builder(eurusd())
            .spot_rate(Currency::EUR, Currency::USD, 0.0)
            .curve(Currency::EUR, "EUR", FlatCurve::new(0.01))
            .curve(Currency::USD, "USD", FlatCurve::new(0.03))
            .surface(FxVolatilitySurface::flat(0.1))
            .build();
        assert!(matches!(result, Err(PricingError::InvalidArgument(_))));
    }

    // ========================================
    // Query Tests
    // ========================================

    #[test]
    fn test_spot_rate_inverse_and_identity() {
        let s = snapshot();
        assert_eq!(s.spot_rate(Currency::EUR, Currency::USD).unwrap(), 1.25);
        assert_relative_eq!(s.spot_rate(Currency::USD, Currency::EUR).unwrap(), 0.8);
        assert_eq!(s.spot_rate(Currency::JPY, Currency::JPY).unwrap(), 1.0);
        assert!(matches!(
            s.spot_rate(Currency::EUR, Currency::JPY),
            Err(PricingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_discount_factor_and_zero_rate() {
        let s = snapshot();
        assert_relative_eq!(
            s.discount_factor(Currency::USD, 2.0).unwrap(),
            (-0.06_f64).exp()
        );
        assert_relative_eq!(s.zero_rate(Currency::EUR, 0.5).unwrap(), 0.01);
        assert!(matches!(
            s.discount_factor(Currency::GBP, 1.0),
            Err(PricingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_volatility_direct_and_inverse_pair() {
        let s = snapshot();
        let direct = s
            .volatility(Currency::EUR, Currency::USD, 1.0, 1.25, 1.2)
            .unwrap();
        assert_relative_eq!(direct, 0.11);

        // USD/EUR strike 0.8 is EUR/USD strike 1.25
        let inverse = s
            .volatility(Currency::USD, Currency::EUR, 1.0, 0.8, 1.0 / 1.2)
            .unwrap();
        assert_relative_eq!(inverse, 0.11, epsilon = 1e-12);
    }

    #[test]
    fn test_volatility_rejects_foreign_pair() {
        let s = snapshot();
        let result = s.volatility(Currency::GBP, Currency::USD, 1.0, 1.3, 1.3);
        assert!(matches!(result, Err(PricingError::InvalidArgument(_))));
        assert!(!s.check_currencies(Currency::GBP, Currency::USD));
        assert!(s.check_currencies(Currency::USD, Currency::EUR));
    }

    #[test]
    fn test_volatility_with_node_sensitivities() {
        let s = snapshot();
        let (vol, weights) = s
            .volatility_with_node_sensitivities(Currency::EUR, Currency::USD, 0.75, 1.125, 1.2)
            .unwrap();
        assert_relative_eq!(vol, 0.115, epsilon = 1e-12);
        assert_relative_eq!(weights.total(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(weights.weights[0][0], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_bumped_copies() {
        let s = snapshot();
        let bumped = s.with_spot_rate(Currency::USD, Currency::EUR, 0.5);
        assert_eq!(bumped.spot_rate(Currency::EUR, Currency::USD).unwrap(), 2.0);

        let bumped = s.with_curve(Currency::USD, FlatCurve::new(0.05));
        assert_relative_eq!(bumped.zero_rate(Currency::USD, 1.0).unwrap(), 0.05);
        assert_eq!(bumped.curve_name(Currency::USD).unwrap(), "USD-SOFR");

        let bumped = s.with_surface(FxVolatilitySurface::flat(0.2));
        assert_eq!(
            bumped
                .volatility(Currency::EUR, Currency::USD, 1.0, 1.25, 1.25)
                .unwrap(),
            0.2
        );
    }

    // ========================================
    // Discount-Factor-Only Tests
    // ========================================

    #[test]
    fn test_discount_factor_snapshot_hides_zero_rates() {
        let s = DiscountFactorSnapshot::new(snapshot());
        let err = s.zero_rate(Currency::USD, 1.0).unwrap_err();
        assert!(err.is_unsupported_shape());
        assert_relative_eq!(
            s.discount_factor(Currency::USD, 1.0).unwrap(),
            s.inner().discount_factor(Currency::USD, 1.0).unwrap()
        );
        assert_eq!(s.currency_pair(), eurusd());
    }
}
