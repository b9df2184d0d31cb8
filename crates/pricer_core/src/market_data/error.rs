//! Market data error types.
//!
//! This module provides structured error handling for market data operations
//! including curve, spot rate and volatility surface lookups.

use crate::types::{Currency, CurrencyPair, InterpolationError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative time to maturity
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Negative time to expiry
/// - `OutOfBounds`: Query outside valid domain
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough data points for construction
/// - `MissingCurve`: No discount curve for a currency
/// - `MissingFxRate`: No spot rate between two currencies
/// - `MissingVolatilitySurface`: No surface for a currency pair
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_core::types::Currency;
///
/// let err = MarketDataError::MissingCurve(Currency::JPY);
/// assert_eq!(err.to_string(), "No discount curve for JPY");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (negative).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// No discount curve registered for the currency.
    #[error("No discount curve for {0}")]
    MissingCurve(Currency),

    /// No spot rate, direct or inverse, between the two currencies.
    #[error("No FX rate between {0} and {1}")]
    MissingFxRate(Currency, Currency),

    /// No volatility surface for the pair in either orientation.
    #[error("No volatility surface for {0}")]
    MissingVolatilitySurface(CurrencyPair),
}
