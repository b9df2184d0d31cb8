//! Core currency and error types.
//!
//! This module provides:
//! - `currency`: ISO 4217 currency codes with metadata
//! - `currency_pair`: Ordered base/quote currency pairs
//! - `amount`: Amounts tagged with their currency
//! - `error`: Structured error types for pricing, currency and interpolation operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Currency`] from `currency`
//! - [`CurrencyPair`] from `currency_pair`
//! - [`CurrencyAmount`] from `amount`
//! - [`PricingError`], [`CurrencyError`], [`InterpolationError`] from `error`

pub mod amount;
pub mod currency;
pub mod currency_pair;
pub mod error;

pub use amount::CurrencyAmount;
pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, InterpolationError, PricingError};
