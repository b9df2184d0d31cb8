//! Volatility surface abstractions for FX option pricing.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Generic trait for implied volatility lookup
//! - [`FxVolatilitySurface`]: Expiry × strike grid surface for FX options
//! - [`SurfaceNodeWeights`]: Node weights of a lookup, used for vega bucketing

mod fx;
mod traits;

pub use fx::{FxVolatilitySurface, SurfaceNodeWeights};
pub use traits::VolatilitySurface;
