//! Core interpolation trait.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a fixed set of nodes.
///
/// Implementations are generic over `T: Float` so that the same node set can
/// be evaluated with `f64` or with an automatic differentiation type.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` if `x` lies outside [`Self::domain`].
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);

    /// Interpolated value at `x`, holding the end values flat outside the domain.
    fn interpolate_flat(&self, x: T) -> T {
        let (lo, hi) = self.domain();
        let clamped = x.max(lo).min(hi);
        self.interpolate(clamped).unwrap_or_else(|_| T::nan())
    }
}
