//! Market data structures for FX option pricing.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (FlatCurve, InterpolatedCurve)
//! - [`surfaces`]: FX volatility surface on an expiry × strike grid
//! - [`snapshot`]: The `MarketSnapshot` interface and in-memory snapshots
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
//! use pricer_core::market_data::surfaces::{VolatilitySurface, FxVolatilitySurface};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let surface = FxVolatilitySurface::flat(0.20_f64);
//! assert_eq!(surface.volatility(1.1, 1.0).unwrap(), 0.20);
//! ```

pub mod curves;
pub mod error;
pub mod snapshot;
pub mod surfaces;

pub use curves::{
    CurveInterpolation, DiscountCurve, FlatCurve, InterpolatedCurve, PillarCurve, YieldCurve,
};
pub use error::MarketDataError;
pub use snapshot::{CurveMarketSnapshot, CurveMarketSnapshotBuilder, DiscountFactorSnapshot, MarketSnapshot};
pub use surfaces::{FxVolatilitySurface, SurfaceNodeWeights, VolatilitySurface};
