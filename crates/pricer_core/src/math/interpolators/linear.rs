//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Locates `x` on the sorted grid `xs` for linear interpolation.
///
/// Returns `(i, w)` such that the interpolated value is
/// `(1 - w) * y[i] + w * y[i + 1]`. Queries outside the grid are clamped to
/// the end nodes (flat extrapolation), so `w` always lies in `[0, 1]`. A
/// single-node grid returns `(0, 0)`.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::linear_bracket;
///
/// let (i, w) = linear_bracket(&[0.5_f64, 1.0, 2.0], 1.5);
/// assert_eq!(i, 1);
/// assert!((w - 0.5).abs() < 1e-12);
///
/// // Flat beyond the last node
/// assert_eq!(linear_bracket(&[0.5, 1.0, 2.0], 5.0), (1, 1.0));
/// ```
pub fn linear_bracket<T: Float>(xs: &[T], x: T) -> (usize, T) {
    let n = xs.len();
    if n < 2 || x <= xs[0] {
        return (0, T::zero());
    }
    if x >= xs[n - 1] {
        return (n - 2, T::one());
    }
    let pos = xs.partition_point(|&xi| xi <= x);
    let i = pos - 1;
    let w = (x - xs[i]) / (xs[i + 1] - xs[i]);
    (i, w)
}

/// Piecewise linear interpolator.
///
/// Stores sorted (x, y) data points and performs linear interpolation
/// between adjacent points.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert!((interp.interpolate(1.25).unwrap() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// Abscissae must be strictly increasing. At least 2 points are required.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - mismatched lengths
    /// * `InterpolationError::InsufficientData` - fewer than 2 points
    /// * `InterpolationError::NonMonotonicData` - `xs` not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        if let Some(index) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Returns the x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sensitivity of the (flat-extrapolated) value at `x` to each node value.
    ///
    /// The returned vector has one entry per node and sums to one.
    pub fn node_weights(&self, x: T) -> Vec<T> {
        let mut weights = vec![T::zero(); self.xs.len()];
        let (i, w) = linear_bracket(&self.xs, x);
        weights[i] = weights[i] + (T::one() - w);
        weights[i + 1] = weights[i + 1] + w;
        weights
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        let (i, w) = linear_bracket(&self.xs, x);
        Ok(self.ys[i] + (self.ys[i + 1] - self.ys[i]) * w)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
