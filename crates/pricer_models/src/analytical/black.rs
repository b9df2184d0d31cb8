//! Black formula on the forward with exact first- and second-order adjoints.
//!
//! This is the Garman-Kohlhagen price written in forward form:
//!
//! ```text
//! P = df · ω · (F·N(ω d1) − K·N(ω d2))
//! d1 = ln(F/K)/(σ√T) + ½σ√T
//! d2 = d1 − σ√T
//! ```
//!
//! with ω = +1 for a call and −1 for a put. The adjoint returns every
//! derivative the FX vanilla risk needs in a single evaluation.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::black::black_price_adjoint;
//!
//! // ATM forward, 10% vol, 1y: price ≈ F·(2Φ(0.05) − 1)
//! let adj = black_price_adjoint(1.2, 1.2, 1.0, 0.10, 1.0, true);
//! assert!((adj.price - 0.047_85).abs() < 1e-4);
//! assert!((adj.d_forward - 0.5199).abs() < 1e-4);
//! ```
//!
//! Zero expiry and zero volatility are not guarded; they propagate as
//! NaN or infinity.

use super::distributions::{norm_cdf, norm_pdf};

/// Black price together with its derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPriceAdjoint {
    /// Discounted price per unit of foreign notional.
    pub price: f64,
    /// ∂P/∂F
    pub d_forward: f64,
    /// ∂P/∂σ
    pub d_vol: f64,
    /// ∂P/∂K
    pub d_strike: f64,
    /// ∂P/∂df
    pub d_discount_factor: f64,
    /// ∂²P/∂F²
    pub d2_forward: f64,
    /// ∂²P/∂F∂σ
    pub d2_forward_vol: f64,
    /// ∂²P/∂σ²
    pub d2_vol: f64,
}

/// Black model inputs with precomputed d1, d2.
#[derive(Debug, Clone, Copy)]
pub struct Black {
    forward: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    discount_factor: f64,
    sqrt_t: f64,
    d1: f64,
    d2: f64,
}

impl Black {
    /// Creates a Black evaluator.
    pub fn new(forward: f64, strike: f64, expiry: f64, volatility: f64, discount_factor: f64) -> Self {
        let sqrt_t = expiry.sqrt();
        let sigma_root_t = volatility * sqrt_t;
        let d1 = (forward / strike).ln() / sigma_root_t + 0.5 * sigma_root_t;
        Self {
            forward,
            strike,
            expiry,
            volatility,
            discount_factor,
            sqrt_t,
            d1,
            d2: d1 - sigma_root_t,
        }
    }

    /// d1 term.
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// d2 term.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// Discounted price.
    pub fn price(&self, is_call: bool) -> f64 {
        let omega = omega(is_call);
        self.discount_factor
            * omega
            * (self.forward * norm_cdf(omega * self.d1) - self.strike * norm_cdf(omega * self.d2))
    }

    /// Undiscounted driftless theta, −F·φ(d1)·σ/(2√T).
    ///
    /// Identical for calls and puts; carries no curve-rate dependence.
    pub fn driftless_theta(&self) -> f64 {
        -self.forward * norm_pdf(self.d1) * self.volatility / (2.0 * self.sqrt_t)
    }

    /// Price and all derivatives.
    pub fn adjoint(&self, is_call: bool) -> BlackPriceAdjoint {
        let omega = omega(is_call);
        let df = self.discount_factor;
        let n1 = norm_cdf(omega * self.d1);
        let n2 = norm_cdf(omega * self.d2);
        let pdf1 = norm_pdf(self.d1);
        let undiscounted = omega * (self.forward * n1 - self.strike * n2);
        let vega = df * self.forward * pdf1 * self.sqrt_t;

        BlackPriceAdjoint {
            price: df * undiscounted,
            d_forward: df * omega * n1,
            d_vol: vega,
            d_strike: -df * omega * n2,
            d_discount_factor: undiscounted,
            d2_forward: df * pdf1 / (self.forward * self.volatility * self.sqrt_t),
            d2_forward_vol: -df * pdf1 * self.d2 / self.volatility,
            d2_vol: vega * self.d1 * self.d2 / self.volatility,
        }
    }

    /// Forward.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Time to expiry.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }
}

/// Black price adjoint in one call.
///
/// # Arguments
///
/// * `forward` - Forward FX rate
/// * `strike` - Strike in domestic per foreign
/// * `expiry` - Time to expiry in years
/// * `volatility` - Lognormal volatility
/// * `discount_factor` - Domestic discount factor to payment
/// * `is_call` - `true` for a call
pub fn black_price_adjoint(
    forward: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    discount_factor: f64,
    is_call: bool,
) -> BlackPriceAdjoint {
    Black::new(forward, strike, expiry, volatility, discount_factor).adjoint(is_call)
}

#[inline]
fn omega(is_call: bool) -> f64 {
    if is_call {
        1.0
    } else {
        -1.0
    }
}
