//! Financial instrument definitions.
//!
//! Instruments are plain, validated value types. Pricing lives in
//! `pricer_risk`; this module only describes what is being valued.
//!
//! # Modules
//!
//! - [`fx`]: FX option families and the [`fx::FxOptionContract`] union
//!
//! # Errors
//!
//! Construction failures are reported as [`InstrumentError`], which converts
//! into `PricingError::InvalidArgument`.

mod error;

pub mod fx;

pub use error::InstrumentError;
