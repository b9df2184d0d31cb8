//! Instrument error types.
//!
//! This module provides structured error handling for FX option
//! contract construction.

use pricer_core::types::{CurrencyError, PricingError};
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike is non-positive or not finite
/// - `InvalidNotional`: Notional is not finite
/// - `InvalidTime`: Expiry or payment time is negative or not finite
/// - `InvalidBarrier`: Barrier level is non-positive or not finite
/// - `InvalidRebate`: Rebate is not finite
/// - `Currency`: Currency pair construction failed
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -1.1 };
/// assert!(format!("{}", err).contains("-1.1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike (non-positive or not finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid notional amount.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Invalid expiry or payment time.
    #[error("Invalid {name}: t = {time}")]
    InvalidTime {
        /// Which time was rejected
        name: &'static str,
        /// The invalid time value
        time: f64,
    },

    /// Invalid barrier level.
    #[error("Invalid barrier level: H = {level}")]
    InvalidBarrier {
        /// The invalid level
        level: f64,
    },

    /// Invalid rebate amount.
    #[error("Invalid rebate: R = {rebate}")]
    InvalidRebate {
        /// The invalid rebate
        rebate: f64,
    },

    /// Currency pair error.
    #[error("Currency error: {0}")]
    Currency(#[from] CurrencyError),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}
