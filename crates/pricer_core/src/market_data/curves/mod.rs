//! Discount curve abstractions.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`PillarCurve`]: Curves whose zero rates decompose onto pillar rates
//! - [`FlatCurve`]: Constant rate yield curve implementation
//! - [`InterpolatedCurve`]: Pillar-based interpolated yield curve
//! - [`CurveInterpolation`]: Interpolation method selection
//! - [`DiscountCurve`]: Static dispatch enum wrapping the concrete curves

mod curve_enum;
mod flat;
mod interpolated;
mod traits;

pub use curve_enum::DiscountCurve;
pub use flat::FlatCurve;
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use traits::{PillarCurve, YieldCurve};
