//! Cash-or-nothing digital option formulas.
//!
//! Per unit of payout:
//!
//! ```text
//! V = D · Φ(ω d)
//! d = (ln(X/K) + (b − ½σ²)T) / (σ√T)
//! ```
//!
//! where `X` is the underlying (spot or forward), `D` the discount to
//! payment and `b` the carry of `X` (zero for a forward).
//!
//! Greeks follow from ∂d/∂X = 1/(Xσ√T) and ∂d/∂σ = −(d + σ√T)/σ. Theta is
//! the decay convention `−∂V/∂T`.

use super::distributions::{norm_cdf, norm_pdf};

/// Price and Greeks of a unit digital.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitalGreeks {
    /// Discounted probability of finishing in the money.
    pub price: f64,
    /// ∂V/∂X
    pub delta: f64,
    /// ∂²V/∂X²
    pub gamma: f64,
    /// −∂V/∂T
    pub theta: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂²V/∂X∂σ
    pub vanna: f64,
    /// ∂²V/∂σ²
    pub vomma: f64,
}

/// Unit digital on a spot or forward underlying.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::digital::Digital;
///
/// let call = Digital::from_forward(1.2, 1.2, 1.0, 0.1, 0.98).price(true);
/// let put = Digital::from_forward(1.2, 1.2, 1.0, 0.1, 0.98).price(false);
/// assert!((call + put - 0.98).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Digital {
    underlying: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    rate: f64,
    carry: f64,
    discount: f64,
    d: f64,
}

impl Digital {
    /// Digital on spot with continuously compounded rate and carry.
    ///
    /// The discount is `e^{−rT}`.
    pub fn from_spot(spot: f64, strike: f64, expiry: f64, volatility: f64, rate: f64, carry: f64) -> Self {
        Self::build(spot, strike, expiry, volatility, rate, carry, (-rate * expiry).exp())
    }

    /// Digital on the forward, discounted with an explicit discount factor.
    pub fn from_forward(forward: f64, strike: f64, expiry: f64, volatility: f64, discount_factor: f64) -> Self {
        let rate = -discount_factor.ln() / expiry;
        Self::build(forward, strike, expiry, volatility, rate, 0.0, discount_factor)
    }

    fn build(
        underlying: f64,
        strike: f64,
        expiry: f64,
        volatility: f64,
        rate: f64,
        carry: f64,
        discount: f64,
    ) -> Self {
        let sigma_root_t = volatility * expiry.sqrt();
        let d = ((underlying / strike).ln() + carry * expiry) / sigma_root_t - 0.5 * sigma_root_t;
        Self {
            underlying,
            strike,
            expiry,
            volatility,
            rate,
            carry,
            discount,
            d,
        }
    }

    /// The `d` term.
    #[inline]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Discounted price per unit payout.
    #[inline]
    pub fn price(&self, is_call: bool) -> f64 {
        self.discount * norm_cdf(omega(is_call) * self.d)
    }

    /// Price and all Greeks.
    pub fn greeks(&self, is_call: bool) -> DigitalGreeks {
        let omega = omega(is_call);
        let x = self.underlying;
        let sigma = self.volatility;
        let t = self.expiry;
        let sqrt_t = t.sqrt();
        let sigma_root_t = sigma * sqrt_t;
        let d = self.d;
        let g = d + sigma_root_t;
        let pdf = norm_pdf(d);
        let disc_pdf = omega * self.discount * pdf;
        let price = self.price(is_call);

        let dd_dt = -(x / self.strike).ln() / (2.0 * sigma * t * sqrt_t)
            + (self.carry - 0.5 * sigma * sigma) / (2.0 * sigma * sqrt_t);

        DigitalGreeks {
            price,
            delta: disc_pdf / (x * sigma_root_t),
            gamma: -disc_pdf * g / (x * x * sigma * sigma * t),
            theta: self.rate * price - disc_pdf * dd_dt,
            vega: -disc_pdf * g / sigma,
            vanna: disc_pdf / (x * sigma * sigma * sqrt_t) * (d * g - 1.0),
            vomma: -disc_pdf / (sigma * sigma) * (g * (d * g - 1.0) - d),
        }
    }
}

#[inline]
fn omega(is_call: bool) -> f64 {
    if is_call {
        1.0
    } else {
        -1.0
    }
}
