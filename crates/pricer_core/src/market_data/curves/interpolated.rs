//! Interpolated yield curve implementation.

use super::{PillarCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{linear_bracket, Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for yield curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates.
    Linear,

    /// Linear interpolation on `ln D(t)` (piecewise constant forwards).
    LogLinear,
}

/// Yield curve defined by zero rates at pillar maturities.
///
/// Outside the pillar range the curve either fails with `OutOfBounds` or,
/// when extrapolation is allowed, holds the boundary zero rate flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve, CurveInterpolation};
///
/// let curve = InterpolatedCurve::new(
///     &[0.25_f64, 0.5, 1.0, 2.0, 5.0],
///     &[0.02, 0.025, 0.03, 0.035, 0.04],
///     CurveInterpolation::Linear,
///     false,
/// ).unwrap();
///
/// let r = curve.zero_rate(0.75).unwrap();
/// assert!((r - 0.0275).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    nodes: LinearInterpolator<T>,
    method: CurveInterpolation,
    allow_extrapolation: bool,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct a curve from pillar tenors and zero rates.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - fewer than 2 pillars, or
    ///   mismatched lengths
    /// * `MarketDataError::InvalidMaturity` - a non-positive or unsorted tenor
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if tenors.len() != rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: tenors.len(),
            });
        }
        for (i, &tenor) in tenors.iter().enumerate() {
            if tenor <= T::zero() || (i > 0 && tenor <= tenors[i - 1]) {
                return Err(MarketDataError::InvalidMaturity {
                    t: tenor.to_f64().unwrap_or(0.0),
                });
            }
        }

        Ok(Self {
            nodes: LinearInterpolator::new(tenors, rates)?,
            method,
            allow_extrapolation,
        })
    }

    /// Range of pillar tenors.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        self.nodes.domain()
    }

    /// Pillar zero rates.
    #[inline]
    pub fn rates(&self) -> &[T] {
        self.nodes.ys()
    }

    /// Interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Whether flat extrapolation is allowed.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn check_domain(&self, t: T) -> Result<(), MarketDataError> {
        let (t_min, t_max) = self.domain();
        if !self.allow_extrapolation && (t < t_min || t > t_max) {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: t_min.to_f64().unwrap_or(0.0),
                max: t_max.to_f64().unwrap_or(0.0),
            });
        }
        Ok(())
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        let rate = self.zero_rate(t)?;
        Ok((-rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if self.method == CurveInterpolation::Linear && t > T::zero() {
            self.check_domain(t)?;
            return Ok(self.nodes.interpolate_flat(t));
        }
        let weights = self.zero_rate_weights(t)?;
        Ok(weights
            .iter()
            .zip(self.rates().iter())
            .fold(T::zero(), |acc, (&w, &r)| acc + w * r))
    }
}

impl<T: Float> PillarCurve<T> for InterpolatedCurve<T> {
    fn pillars(&self) -> &[T] {
        self.nodes.xs()
    }

    fn zero_rate_weights(&self, t: T) -> Result<Vec<T>, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        self.check_domain(t)?;

        let (t_min, t_max) = self.domain();
        if self.method == CurveInterpolation::Linear || t <= t_min || t >= t_max {
            return Ok(self.nodes.node_weights(t));
        }

        // r(t) t = (1 - w) r_i t_i + w r_{i+1} t_{i+1}
        let tenors = self.nodes.xs();
        let mut weights = vec![T::zero(); tenors.len()];
        let (i, w) = linear_bracket(tenors, t);
        weights[i] = (T::one() - w) * tenors[i] / t;
        weights[i + 1] = w * tenors[i + 1] / t;
        Ok(weights)
    }
}
