//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised by valuation and risk operations
//! - `CurrencyError`: Errors from currency parsing and pair construction
//! - `InterpolationError`: Errors from interpolation operations

use thiserror::Error;

use crate::market_data::error::MarketDataError;

/// Errors raised by pricing and sensitivity operations.
///
/// Every public pricer operation validates its arguments eagerly and fails
/// with one of these variants. Numerical degeneracies such as a zero time to
/// expiry or a zero volatility are not reported here; they propagate as
/// non-finite results.
///
/// # Examples
///
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidArgument("option currencies not compatible with smile data".into());
/// assert!(err.to_string().contains("Invalid argument"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Missing or inconsistent input, e.g. a currency pair the snapshot
    /// cannot serve or an invalid configuration value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The snapshot cannot supply market data in the shape the operation
    /// requires (e.g. zero rates from a discount-factor-only provider).
    #[error("Unsupported market data shape: {0}")]
    UnsupportedMarketDataShape(String),

    /// Failure raised while reading curves, spot rates or surfaces.
    #[error("Market data error: {0}")]
    MarketData(MarketDataError),
}

impl PricingError {
    /// Returns true for errors caused by the snapshot's data shape.
    #[inline]
    pub fn is_unsupported_shape(&self) -> bool {
        matches!(self, PricingError::UnsupportedMarketDataShape(_))
    }
}

impl From<MarketDataError> for PricingError {
    /// Missing curves, spot rates and surfaces are caller input errors and
    /// map to `InvalidArgument`. Everything else stays a market data error.
    fn from(e: MarketDataError) -> Self {
        match e {
            MarketDataError::MissingCurve(_)
            | MarketDataError::MissingFxRate(..)
            | MarketDataError::MissingVolatilitySurface(_) => {
                PricingError::InvalidArgument(e.to_string())
            }
            other => PricingError::MarketData(other),
        }
    }
}

impl From<CurrencyError> for PricingError {
    fn from(e: CurrencyError) -> Self {
        PricingError::InvalidArgument(e.to_string())
    }
}

/// Errors from currency parsing and currency pair construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown ISO 4217 code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Malformed currency pair string such as `"EURUSD"`.
    #[error("Currency parse error: {0}")]
    ParseError(String),

    /// Base and quote currencies are identical.
    #[error("Base and quote currencies are the same: {0}")]
    SameCurrency(String),

    /// Spot rate is zero, negative or non-finite.
    #[error("Invalid spot rate: must be positive")]
    InvalidSpotRate,
}

/// Errors from interpolation operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside the valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// Query point
        x: f64,
        /// Lower domain bound
        min: f64,
        /// Upper domain bound
        max: f64,
    },

    /// Too few nodes to interpolate.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Points provided
        got: usize,
        /// Points required
        need: usize,
    },

    /// Abscissae are not strictly increasing.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// First offending index
        index: usize,
    },

    /// Any other invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
