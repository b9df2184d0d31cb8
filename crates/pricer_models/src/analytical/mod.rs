//! Analytical pricing formulas for FX options.
//!
//! This module provides closed-form and semi-closed-form prices:
//! - [`black`]: Black/Garman-Kohlhagen on the forward, with exact adjoints
//! - [`bjerksund_stensland`]: American approximation (2002), dual-number adjoint
//! - [`digital`]: cash-or-nothing digital with analytic Greeks
//! - [`barrier`]: single barrier with rebate, dual-number adjoint
//! - [`distributions`]: univariate and bivariate normal functions
//!
//! ## Design Principles
//!
//! - **Plain `f64` inputs**: the risk layer owns market data and conventions
//! - **Dual numbers where no closed-form derivative exists**: `num_dual::Dual64`
//!   carries one tangent per pass
//! - **No guards on degeneracies**: zero expiry or volatility yield NaN/∞

pub mod barrier;
pub mod bjerksund_stensland;
pub mod black;
pub mod digital;
pub mod distributions;

// Re-export main types at module level
pub use barrier::{BarrierInputs, BarrierPriceAdjoint};
pub use bjerksund_stensland::{
    bjerksund_stensland_adjoint, bjerksund_stensland_price, AmericanPriceAdjoint,
};
pub use black::{black_price_adjoint, Black, BlackPriceAdjoint};
pub use digital::{Digital, DigitalGreeks};
pub use distributions::{
    bivariate_norm_cdf, bivariate_norm_cdf_dual, norm_cdf, norm_cdf_dual, norm_pdf, norm_pdf_dual,
};
