//! # pricer_core: Foundation for FX Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Currency types: `Currency`, `CurrencyPair`, `CurrencyAmount` (`types`)
//! - Error types: `PricingError`, `CurrencyError`, `InterpolationError` (`types::error`)
//! - Linear interpolation with node weights (`math::interpolators`)
//! - Discount curves and FX volatility surfaces (`market_data`)
//! - The `MarketSnapshot` interface consumed by every pricer (`market_data::snapshot`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(usd.decimal_places(), 2);
//!
//! let pair: CurrencyPair = "EUR/USD".parse().unwrap();
//! assert_eq!(pair.inverse().code(), "USD/EUR");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for currencies, amounts, curves and surfaces

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
