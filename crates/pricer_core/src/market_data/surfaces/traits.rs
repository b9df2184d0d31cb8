//! Volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic volatility surface trait for implied volatility lookup.
///
/// # Contract
///
/// - `volatility(strike, expiry)` returns the implied volatility σ(K, T)
/// - `strike_domain()` returns the range covered by quoted strikes
/// - `expiry_domain()` returns the range covered by quoted expiries
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilitySurface, FxVolatilitySurface};
///
/// let surface = FxVolatilitySurface::flat(0.20_f64);
/// assert_eq!(surface.volatility(1.3, 1.0).unwrap(), 0.20);
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Implied volatility for a strike and expiry.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidStrike` - if strike <= 0
    /// * `MarketDataError::InvalidExpiry` - if expiry < 0
    /// * `MarketDataError::OutOfBounds` - outside the grid without extrapolation
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Range of quoted strikes `(K_min, K_max)`.
    fn strike_domain(&self) -> (T, T);

    /// Range of quoted expiries `(T_min, T_max)`.
    fn expiry_domain(&self) -> (T, T);
}
