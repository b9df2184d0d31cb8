//! Yield curve trait definitions.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic yield curve trait for discount factor and rate calculations.
///
/// # Contract
///
/// - `discount_factor(t)` returns the discount factor D(t) for maturity t
/// - `zero_rate(t)` returns the continuously compounded zero rate r(t)
/// - `forward_rate(t1, t2)` returns the forward rate between t1 and t2
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// assert!((curve.zero_rate(1.0).unwrap() - 0.05).abs() < 1e-10);
/// assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-10);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor for maturity `t` (years).
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t < 0`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate, `r(t) = -ln(D(t)) / t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t <= 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Forward rate between `t1` and `t2`, `-ln(D(t2)/D(t1)) / (t2 - t1)`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t2 <= t1`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }
}

/// A yield curve built on a pillar grid of zero rates.
///
/// The zero rate at any maturity is a linear combination of the pillar zero
/// rates. The combination weights let a point rate sensitivity be bucketed
/// onto the pillars.
pub trait PillarCurve<T: Float>: YieldCurve<T> {
    /// Pillar maturities in years, strictly increasing.
    fn pillars(&self) -> &[T];

    /// `d r(t) / d r_j` for every pillar `j`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t <= 0`, or `OutOfBounds` when
    /// `t` lies off the grid and the curve does not extrapolate.
    fn zero_rate_weights(&self, t: T) -> Result<Vec<T>, MarketDataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantCurve {
        rate: f64,
    }

    impl YieldCurve<f64> for ConstantCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = ConstantCurve { rate: 0.05 };
        assert!((curve.zero_rate(1.0).unwrap() - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_default_zero_rate_at_origin() {
        let curve = ConstantCurve { rate: 0.05 };
        assert_eq!(
            curve.zero_rate(0.0).unwrap_err(),
            MarketDataError::InvalidMaturity { t: 0.0 }
        );
    }

    #[test]
    fn test_default_forward_rate() {
        let curve = ConstantCurve { rate: 0.05 };
        assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-10);
        assert!(curve.forward_rate(2.0, 1.0).is_err());
    }
}
