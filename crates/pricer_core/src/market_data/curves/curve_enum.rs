//! Static dispatch over the concrete discount curve types.

use super::{FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// A discount curve held by a market snapshot.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{DiscountCurve, FlatCurve, YieldCurve};
///
/// let curve: DiscountCurve<f64> = FlatCurve::new(0.03).into();
/// assert!((curve.zero_rate(2.0).unwrap() - 0.03).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub enum DiscountCurve<T: Float> {
    /// Constant-rate curve.
    Flat(FlatCurve<T>),
    /// Pillar curve.
    Interpolated(InterpolatedCurve<T>),
}

impl<T: Float> YieldCurve<T> for DiscountCurve<T> {
    #[inline]
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            DiscountCurve::Flat(c) => c.discount_factor(t),
            DiscountCurve::Interpolated(c) => c.discount_factor(t),
        }
    }

    #[inline]
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            DiscountCurve::Flat(c) => c.zero_rate(t),
            DiscountCurve::Interpolated(c) => c.zero_rate(t),
        }
    }
}

impl<T: Float> From<FlatCurve<T>> for DiscountCurve<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        DiscountCurve::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for DiscountCurve<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        DiscountCurve::Interpolated(curve)
    }
}
