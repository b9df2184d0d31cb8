//! Bjerksund-Stensland (2002) approximation for American options.
//!
//! The call is priced with a two-step flat exercise boundary split at
//! `t1 = ½(√5 − 1)T`; puts use the put-call transformation
//!
//! ```text
//! P(S, K, T, r, b, σ) = C(K, S, T, r − b, −b, σ)
//! ```
//!
//! where `b` is the cost of carry. When `b ≥ r` early exercise of a call is
//! never optimal and the generalised Black-Scholes price is returned. The
//! approximation is floored at the European price and at intrinsic value.
//!
//! Prices are evaluated on `Dual64` so that a single pass per seeded input
//! yields the exact first-order derivative alongside the price.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::bjerksund_stensland::bjerksund_stensland_price;
//!
//! // American put, S = 36, K = 40, r = 6%, no carry, 1y, 20% vol.
//! let p = bjerksund_stensland_price(36.0, 40.0, 0.06, 0.06, 1.0, 0.20, false);
//! assert!(p > 4.45 && p < 4.48);
//! ```

use super::distributions::{bivariate_norm_cdf_dual, norm_cdf_dual};
use num_dual::{Dual64, DualNum};

/// Price and first-order derivatives of the Bjerksund-Stensland price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanPriceAdjoint {
    /// Option price per unit of foreign notional.
    pub price: f64,
    /// ∂P/∂S
    pub d_spot: f64,
    /// ∂P/∂K
    pub d_strike: f64,
    /// ∂P/∂r
    pub d_rate: f64,
    /// ∂P/∂b
    pub d_carry: f64,
    /// ∂P/∂σ
    pub d_vol: f64,
}

/// American option price.
///
/// # Arguments
///
/// * `spot` - Spot FX rate
/// * `strike` - Strike
/// * `rate` - Domestic continuously compounded rate `r`
/// * `carry` - Cost of carry `b = r_domestic − r_foreign`
/// * `expiry` - Time to expiry in years
/// * `volatility` - Lognormal volatility
/// * `is_call` - `true` for a call
pub fn bjerksund_stensland_price(
    spot: f64,
    strike: f64,
    rate: f64,
    carry: f64,
    expiry: f64,
    volatility: f64,
    is_call: bool,
) -> f64 {
    price_dual(
        Dual64::from(spot),
        Dual64::from(strike),
        Dual64::from(rate),
        Dual64::from(carry),
        expiry,
        Dual64::from(volatility),
        is_call,
    )
    .re
}

/// American option price with its derivatives with respect to spot, strike,
/// rate, carry and volatility.
///
/// Each derivative is one forward-mode pass with the matching input seeded.
pub fn bjerksund_stensland_adjoint(
    spot: f64,
    strike: f64,
    rate: f64,
    carry: f64,
    expiry: f64,
    volatility: f64,
    is_call: bool,
) -> AmericanPriceAdjoint {
    let inputs = [spot, strike, rate, carry, volatility];
    let mut tangents = [0.0; 5];
    let mut price = 0.0;
    for (seed, tangent) in tangents.iter_mut().enumerate() {
        let x: [Dual64; 5] =
            std::array::from_fn(|i| Dual64::new(inputs[i], if i == seed { 1.0 } else { 0.0 }));
        let p = price_dual(x[0], x[1], x[2], x[3], expiry, x[4], is_call);
        price = p.re;
        *tangent = p.eps;
    }

    AmericanPriceAdjoint {
        price,
        d_spot: tangents[0],
        d_strike: tangents[1],
        d_rate: tangents[2],
        d_carry: tangents[3],
        d_vol: tangents[4],
    }
}

fn price_dual(
    s: Dual64,
    k: Dual64,
    r: Dual64,
    b: Dual64,
    t: f64,
    sigma: Dual64,
    is_call: bool,
) -> Dual64 {
    if is_call {
        call_price(s, k, r, b, t, sigma)
    } else {
        call_price(k, s, r - b, -b, t, sigma)
    }
}

#[inline]
fn c(x: f64) -> Dual64 {
    Dual64::from(x)
}

/// x^γ for positive x.
#[inline]
fn pow(x: Dual64, gamma: Dual64) -> Dual64 {
    (gamma * x.ln()).exp()
}

fn generalised_black_scholes_call(
    s: Dual64,
    k: Dual64,
    r: Dual64,
    b: Dual64,
    t: f64,
    sigma: Dual64,
) -> Dual64 {
    let sigma_root_t = sigma * c(t.sqrt());
    let d1 = ((s / k).ln() + (b + sigma * sigma * c(0.5)) * c(t)) / sigma_root_t;
    let d2 = d1 - sigma_root_t;
    s * ((b - r) * c(t)).exp() * norm_cdf_dual(d1) - k * (-r * c(t)).exp() * norm_cdf_dual(d2)
}

fn call_price(s: Dual64, k: Dual64, r: Dual64, b: Dual64, t: f64, sigma: Dual64) -> Dual64 {
    if b.re >= r.re {
        return generalised_black_scholes_call(s, k, r, b, t, sigma);
    }

    let t1 = 0.5 * (5.0_f64.sqrt() - 1.0) * t;
    let sigma2 = sigma * sigma;
    let half = c(0.5);
    let one = c(1.0);
    let zero = c(0.0);

    let beta = (half - b / sigma2) + ((b / sigma2 - half) * (b / sigma2 - half) + c(2.0) * r / sigma2).sqrt();
    let b_inf = beta / (beta - one) * k;
    let b0 = {
        let ratio = r / (r - b);
        if ratio.re > 1.0 {
            ratio * k
        } else {
            k
        }
    };

    let spread = (b_inf - b0) * b0;
    let h1 = -(b * c(t1) + c(2.0) * sigma * c(t1.sqrt())) * k * k / spread;
    let h2 = -(b * c(t) + c(2.0) * sigma * c(t.sqrt())) * k * k / spread;
    let i1 = b0 + (b_inf - b0) * (one - h1.exp());
    let i2 = b0 + (b_inf - b0) * (one - h2.exp());

    let intrinsic = s - k;
    if s.re >= i2.re {
        return intrinsic;
    }

    let alpha1 = (i1 - k) * pow(i1, -beta);
    let alpha2 = (i2 - k) * pow(i2, -beta);

    let m = Model { r, b, sigma };
    let value = alpha2 * pow(s, beta) - alpha2 * m.phi(s, t1, beta, i2, i2)
        + m.phi(s, t1, one, i2, i2)
        - m.phi(s, t1, one, i1, i2)
        - k * m.phi(s, t1, zero, i2, i2)
        + k * m.phi(s, t1, zero, i1, i2)
        + alpha1 * m.phi(s, t1, beta, i1, i2)
        - alpha1 * m.psi(s, t, beta, i1, i2, i1, t1)
        + m.psi(s, t, one, i1, i2, i1, t1)
        - m.psi(s, t, one, k, i2, i1, t1)
        - k * m.psi(s, t, zero, i1, i2, i1, t1)
        + k * m.psi(s, t, zero, k, i2, i1, t1);

    // Floor at the European value and at immediate exercise.
    let european = generalised_black_scholes_call(s, k, r, b, t, sigma);
    let floor = if european.re > intrinsic.re { european } else { intrinsic };
    if value.re < floor.re {
        floor
    } else {
        value
    }
}

/// Rate, carry and volatility shared by the φ and ψ auxiliary functions.
struct Model {
    r: Dual64,
    b: Dual64,
    sigma: Dual64,
}

impl Model {
    /// Drift of ln S under the measure weighted by S^γ.
    #[inline]
    fn drift(&self, gamma: Dual64) -> Dual64 {
        self.b + (gamma - c(0.5)) * self.sigma * self.sigma
    }

    #[inline]
    fn lambda(&self, gamma: Dual64) -> Dual64 {
        -self.r + gamma * self.b + c(0.5) * gamma * (gamma - c(1.0)) * self.sigma * self.sigma
    }

    #[inline]
    fn kappa(&self, gamma: Dual64) -> Dual64 {
        c(2.0) * self.b / (self.sigma * self.sigma) + (c(2.0) * gamma - c(1.0))
    }

    fn phi(&self, s: Dual64, t: f64, gamma: Dual64, h: Dual64, i: Dual64) -> Dual64 {
        let sigma_root_t = self.sigma * c(t.sqrt());
        let lambda = self.lambda(gamma) * c(t);
        let d = -((s / h).ln() + self.drift(gamma) * c(t)) / sigma_root_t;
        let kappa = self.kappa(gamma);
        lambda.exp()
            * pow(s, gamma)
            * (norm_cdf_dual(d)
                - pow(i / s, kappa) * norm_cdf_dual(d - c(2.0) * (i / s).ln() / sigma_root_t))
    }

    #[allow(clippy::too_many_arguments)]
    fn psi(
        &self,
        s: Dual64,
        t2: f64,
        gamma: Dual64,
        h: Dual64,
        i2: Dual64,
        i1: Dual64,
        t1: f64,
    ) -> Dual64 {
        let sigma_root_t1 = self.sigma * c(t1.sqrt());
        let sigma_root_t2 = self.sigma * c(t2.sqrt());
        let rho = (t1 / t2).sqrt();
        let kappa = self.kappa(gamma);
        let drift = self.drift(gamma);

        let e1 = ((s / i1).ln() + drift * c(t1)) / sigma_root_t1;
        let e2 = ((i2 * i2 / (s * i1)).ln() + drift * c(t1)) / sigma_root_t1;
        let e3 = ((s / i1).ln() - drift * c(t1)) / sigma_root_t1;
        let e4 = ((i2 * i2 / (s * i1)).ln() - drift * c(t1)) / sigma_root_t1;

        let f1 = ((s / h).ln() + drift * c(t2)) / sigma_root_t2;
        let f2 = ((i2 * i2 / (s * h)).ln() + drift * c(t2)) / sigma_root_t2;
        let f3 = ((i1 * i1 / (s * h)).ln() + drift * c(t2)) / sigma_root_t2;
        let f4 = ((s * i1 * i1 / (h * i2 * i2)).ln() + drift * c(t2)) / sigma_root_t2;

        (self.lambda(gamma) * c(t2)).exp()
            * pow(s, gamma)
            * (bivariate_norm_cdf_dual(-e1, -f1, rho)
                - pow(i2 / s, kappa) * bivariate_norm_cdf_dual(-e2, -f2, rho)
                - pow(i1 / s, kappa) * bivariate_norm_cdf_dual(-e3, -f3, -rho)
                + pow(i1 / i2, kappa) * bivariate_norm_cdf_dual(-e4, -f4, -rho))
    }
}
