//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve with one continuously compounded rate for all maturities.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.05);
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Flat curve at `rate`.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Flat curve whose discount factor at `t` equals `df`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t <= 0`.
    pub fn from_discount_factor(df: T, t: T) -> Result<Self, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(Self::new(-df.ln() / t))
    }

    /// The constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        let curve = FlatCurve::new(0.05_f64);
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), (-0.1_f64).exp());
        assert!(curve.discount_factor(-1.0).is_err());
    }

    #[test]
    fn test_from_discount_factor() {
        let curve = FlatCurve::from_discount_factor(0.95_f64, 2.0).unwrap();
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), 0.95, epsilon = 1e-14);
        assert!(FlatCurve::from_discount_factor(0.95_f64, 0.0).is_err());
    }

    #[test]
    fn test_zero_and_forward_rates() {
        let curve = FlatCurve::new(-0.005_f64);
        assert_eq!(curve.zero_rate(0.25).unwrap(), -0.005);
        assert_eq!(curve.forward_rate(0.5, 3.0).unwrap(), -0.005);
        assert!(curve.zero_rate(0.0).is_err());
        assert!(curve.forward_rate(1.0, 1.0).is_err());
    }
}
