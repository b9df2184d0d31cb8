//! FX volatility surface on an expiry × strike grid.
//!
//! This module provides:
//! - [`FxVolatilitySurface`]: Bilinear surface with node weight reporting
//! - [`SurfaceNodeWeights`]: Interpolation weights of one lookup against the grid

use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::linear_bracket;
use num_traits::Float;

/// Interpolation weights of one volatility lookup on the surface grid.
///
/// `weights[i][j]` is `d σ / d σ(expiries[i], strikes[j])`. The weights are
/// non-negative and sum to one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceNodeWeights<T> {
    /// Expiry axis of the grid.
    pub expiries: Vec<T>,
    /// Strike axis of the grid.
    pub strikes: Vec<T>,
    /// Weight per `[expiry][strike]` node.
    pub weights: Vec<Vec<T>>,
}

impl<T: Float> SurfaceNodeWeights<T> {
    /// Sum of all weights.
    pub fn total(&self) -> T {
        self.weights
            .iter()
            .flat_map(|row| row.iter())
            .fold(T::zero(), |acc, &w| acc + w)
    }

    /// Every weight multiplied by `factor`.
    pub fn scaled(&self, factor: T) -> Vec<Vec<T>> {
        self.weights
            .iter()
            .map(|row| row.iter().map(|&w| w * factor).collect())
            .collect()
    }
}

/// FX implied volatility surface quoted on an expiry × strike grid.
///
/// Volatilities are interpolated bilinearly in (expiry, strike). Outside the
/// grid the boundary values are held flat when extrapolation is allowed.
/// A single-node axis is allowed, so a 1 × 1 grid is a flat surface.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FxVolatilitySurface, VolatilitySurface};
///
/// let expiries = [0.5_f64, 1.0];
/// let strikes = [1.1, 1.2, 1.3];
/// let vols = [
///     [0.11, 0.10, 0.11],
///     [0.12, 0.11, 0.12],
/// ];
///
/// let surface = FxVolatilitySurface::new(&expiries, &strikes, &vols, true).unwrap();
/// assert!((surface.volatility(1.2, 0.75).unwrap() - 0.105).abs() < 1e-12);
///
/// let (vol, weights) = surface.volatility_with_weights(1.25, 1.0).unwrap();
/// assert!((vol - 0.115).abs() < 1e-12);
/// assert!((weights.total() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxVolatilitySurface<T: Float> {
    expiries: Vec<T>,
    strikes: Vec<T>,
    volatilities: Vec<Vec<T>>,
    allow_extrapolation: bool,
}

impl<T: Float> FxVolatilitySurface<T> {
    /// Construct a surface from an expiry × strike grid.
    ///
    /// `volatilities[i][j]` is the volatility at `expiries[i]`, `strikes[j]`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - empty axis or ragged grid
    /// * `MarketDataError::InvalidExpiry` - negative or unsorted expiries
    /// * `MarketDataError::InvalidStrike` - non-positive or unsorted strikes
    pub fn new(
        expiries: &[T],
        strikes: &[T],
        volatilities: &[impl AsRef<[T]>],
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if expiries.is_empty() || strikes.is_empty() {
            return Err(MarketDataError::InsufficientData {
                got: expiries.len().min(strikes.len()),
                need: 1,
            });
        }
        if volatilities.len() != expiries.len() {
            return Err(MarketDataError::InsufficientData {
                got: volatilities.len(),
                need: expiries.len(),
            });
        }
        for (i, &expiry) in expiries.iter().enumerate() {
            if expiry < T::zero() || (i > 0 && expiry <= expiries[i - 1]) {
                return Err(MarketDataError::InvalidExpiry {
                    expiry: expiry.to_f64().unwrap_or(0.0),
                });
            }
        }
        for (j, &strike) in strikes.iter().enumerate() {
            if strike <= T::zero() || (j > 0 && strike <= strikes[j - 1]) {
                return Err(MarketDataError::InvalidStrike {
                    strike: strike.to_f64().unwrap_or(0.0),
                });
            }
        }
        let mut grid = Vec::with_capacity(expiries.len());
        for row in volatilities {
            let row = row.as_ref();
            if row.len() != strikes.len() {
                return Err(MarketDataError::InsufficientData {
                    got: row.len(),
                    need: strikes.len(),
                });
            }
            grid.push(row.to_vec());
        }

        Ok(Self {
            expiries: expiries.to_vec(),
            strikes: strikes.to_vec(),
            volatilities: grid,
            allow_extrapolation,
        })
    }

    /// A surface with one volatility everywhere (1 × 1 grid at `T = 1`, `K = 1`).
    pub fn flat(vol: T) -> Self {
        Self {
            expiries: vec![T::one()],
            strikes: vec![T::one()],
            volatilities: vec![vec![vol]],
            allow_extrapolation: true,
        }
    }

    /// Expiry axis.
    #[inline]
    pub fn expiries(&self) -> &[T] {
        &self.expiries
    }

    /// Strike axis.
    #[inline]
    pub fn strikes(&self) -> &[T] {
        &self.strikes
    }

    /// Volatility grid `[expiry][strike]`.
    #[inline]
    pub fn volatilities(&self) -> &[Vec<T>] {
        &self.volatilities
    }

    /// Volatility plus the interpolation weight of every grid node.
    ///
    /// # Errors
    ///
    /// Same as [`VolatilitySurface::volatility`].
    pub fn volatility_with_weights(
        &self,
        strike: T,
        expiry: T,
    ) -> Result<(T, SurfaceNodeWeights<T>), MarketDataError> {
        self.check_query(strike, expiry)?;

        let mut weights = vec![vec![T::zero(); self.strikes.len()]; self.expiries.len()];
        let mut vol = T::zero();
        for (i, wi) in axis_weights(&self.expiries, expiry) {
            for (j, wj) in axis_weights(&self.strikes, strike) {
                let w = wi * wj;
                weights[i][j] = weights[i][j] + w;
                vol = vol + w * self.volatilities[i][j];
            }
        }

        Ok((
            vol,
            SurfaceNodeWeights {
                expiries: self.expiries.clone(),
                strikes: self.strikes.clone(),
                weights,
            },
        ))
    }

    fn check_query(&self, strike: T, expiry: T) -> Result<(), MarketDataError> {
        if strike <= T::zero() {
            return Err(MarketDataError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }
        if expiry < T::zero() {
            return Err(MarketDataError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(0.0),
            });
        }
        if !self.allow_extrapolation {
            let (k_min, k_max) = self.strike_domain();
            if strike < k_min || strike > k_max {
                return Err(MarketDataError::OutOfBounds {
                    x: strike.to_f64().unwrap_or(0.0),
                    min: k_min.to_f64().unwrap_or(0.0),
                    max: k_max.to_f64().unwrap_or(0.0),
                });
            }
            let (t_min, t_max) = self.expiry_domain();
            if expiry < t_min || expiry > t_max {
                return Err(MarketDataError::OutOfBounds {
                    x: expiry.to_f64().unwrap_or(0.0),
                    min: t_min.to_f64().unwrap_or(0.0),
                    max: t_max.to_f64().unwrap_or(0.0),
                });
            }
        }
        Ok(())
    }
}

/// Node indices and weights along one axis, flat beyond the ends.
fn axis_weights<T: Float>(xs: &[T], x: T) -> [(usize, T); 2] {
    if xs.len() == 1 {
        return [(0, T::one()), (0, T::zero())];
    }
    let (i, w) = linear_bracket(xs, x);
    [(i, T::one() - w), (i + 1, w)]
}

impl<T: Float> VolatilitySurface<T> for FxVolatilitySurface<T> {
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        self.volatility_with_weights(strike, expiry)
            .map(|(vol, _)| vol)
    }

    fn strike_domain(&self) -> (T, T) {
        (self.strikes[0], self.strikes[self.strikes.len() - 1])
    }

    fn expiry_domain(&self) -> (T, T) {
        (self.expiries[0], self.expiries[self.expiries.len() - 1])
    }
}
