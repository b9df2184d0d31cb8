//! # Pricer Models (L2: Business Logic)
//!
//! FX option contracts and the closed-form models that value them.
//!
//! This crate provides:
//! - Contract definitions for vanilla, American, digital and barrier FX options
//! - Black (Garman-Kohlhagen) price with exact first- and second-order adjoints
//! - Bjerksund-Stensland (2002) American approximation
//! - Digital and single-barrier closed forms
//! - Univariate and bivariate normal distribution functions
//!
//! ## Design Principles
//!
//! - **Enum-based contracts** for static dispatch (`FxOptionContract`)
//! - **Validated construction**: invalid strikes, times and barriers are
//!   rejected up front as `InstrumentError`
//! - **Forward-mode AD** via `num-dual` where closed-form Greeks are unwieldy
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::black_price_adjoint;
//!
//! let adj = black_price_adjoint(1.25, 1.2, 0.5, 0.1, 0.99, true);
//! assert!(adj.price > 0.0);
//! assert!(adj.d_forward > 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
