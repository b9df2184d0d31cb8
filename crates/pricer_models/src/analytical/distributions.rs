//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf` / `norm_pdf`: univariate standard normal CDF and density
//! - `bivariate_norm_cdf`: bivariate standard normal CDF (Genz BVND)
//! - `*_dual` variants propagating a first-order tangent through `Dual64`
//!
//! The univariate CDF is built on `statrs`' complementary error function,
//! which is accurate to machine precision in both tails.

use num_dual::Dual64;
use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½ erfc(−x/√2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x²/2) / √(2π)
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Normal CDF on a dual number: Φ(x) with tangent φ(x)·ẋ.
#[inline]
pub fn norm_cdf_dual(x: Dual64) -> Dual64 {
    Dual64::new(norm_cdf(x.re), norm_pdf(x.re) * x.eps)
}

/// Normal density on a dual number: φ(x) with tangent −x·φ(x)·ẋ.
#[inline]
pub fn norm_pdf_dual(x: Dual64) -> Dual64 {
    let pdf = norm_pdf(x.re);
    Dual64::new(pdf, -x.re * pdf * x.eps)
}

// Gauss-Legendre abscissae (negative half) and weights for 6, 12 and 20 points.
const GL_X3: [f64; 3] = [-0.932_469_514_203_152_2, -0.661_209_386_466_264_7, -0.238_619_186_083_197];
const GL_W3: [f64; 3] = [0.171_324_492_379_170_5, 0.360_761_573_048_138_4, 0.467_913_934_572_690_4];
const GL_X6: [f64; 6] = [
    -0.981_560_634_246_719_1,
    -0.904_117_256_370_475,
    -0.769_902_674_194_305,
    -0.587_317_954_286_617_1,
    -0.367_831_498_998_180_2,
    -0.125_233_408_511_469_2,
];
const GL_W6: [f64; 6] = [
    0.047_175_336_386_511_77,
    0.106_939_325_995_318_3,
    0.160_078_328_543_346_4,
    0.203_167_426_723_065_9,
    0.233_492_536_538_354_7,
    0.249_147_045_813_402_9,
];
const GL_X10: [f64; 10] = [
    -0.993_128_599_185_094_9,
    -0.963_971_927_277_913_8,
    -0.912_234_428_251_325_9,
    -0.839_116_971_822_218_8,
    -0.746_331_906_460_150_8,
    -0.636_053_680_726_515,
    -0.510_867_001_950_827_1,
    -0.373_706_088_715_419_6,
    -0.227_785_851_141_645_1,
    -0.076_526_521_133_497_33,
];
const GL_W10: [f64; 10] = [
    0.017_614_007_139_152_12,
    0.040_601_429_800_386_94,
    0.062_672_048_334_109_06,
    0.083_276_741_576_704_75,
    0.101_930_119_817_240_4,
    0.118_194_531_961_518_4,
    0.131_688_638_449_176_6,
    0.142_096_109_318_382_1,
    0.149_172_986_472_603_7,
    0.152_753_387_130_725_9,
];

/// Upper-orthant probability P(X > h, Y > k) for standard normals with correlation `r`.
///
/// Genz (2004) BVND, double precision for |r| < 1; exact limits at |r| = 1.
fn bvnd(h: f64, k: f64, r: f64) -> f64 {
    let (xs, ws): (&[f64], &[f64]) = if r.abs() < 0.3 {
        (&GL_X3, &GL_W3)
    } else if r.abs() < 0.75 {
        (&GL_X6, &GL_W6)
    } else {
        (&GL_X10, &GL_W10)
    };

    let mut hk = h * k;
    let mut bvn = 0.0;

    if r.abs() < 0.925 {
        let hs = (h * h + k * k) / 2.0;
        let asr = r.asin();
        for (x, w) in xs.iter().zip(ws) {
            let sn = (asr * (x + 1.0) / 2.0).sin();
            bvn += w * ((sn * hk - hs) / (1.0 - sn * sn)).exp();
            let sn = (asr * (-x + 1.0) / 2.0).sin();
            bvn += w * ((sn * hk - hs) / (1.0 - sn * sn)).exp();
        }
        return bvn * asr / (4.0 * PI) + norm_cdf(-h) * norm_cdf(-k);
    }

    let mut k = k;
    if r < 0.0 {
        k = -k;
        hk = -hk;
    }

    if r.abs() < 1.0 {
        let a_s = (1.0 - r) * (1.0 + r);
        let mut a = a_s.sqrt();
        let bs = (h - k) * (h - k);
        let c = (4.0 - hk) / 8.0;
        let d = (12.0 - hk) / 16.0;
        bvn = a
            * (-(bs / a_s + hk) / 2.0).exp()
            * (1.0 - c * (bs - a_s) * (1.0 - d * bs / 5.0) / 3.0 + c * d * a_s * a_s / 5.0);
        if hk > -160.0 {
            let b = bs.sqrt();
            bvn -= (-hk / 2.0).exp()
                * (2.0 * PI).sqrt()
                * norm_cdf(-b / a)
                * b
                * (1.0 - c * bs * (1.0 - d * bs / 5.0) / 3.0);
        }
        a /= 2.0;
        for (x, w) in xs.iter().zip(ws) {
            let xs_ = (a * (x + 1.0)).powi(2);
            let rs = (1.0 - xs_).sqrt();
            bvn += a
                * w
                * ((-bs / (2.0 * xs_) - hk / (1.0 + rs)).exp() / rs
                    - (-(bs / xs_ + hk) / 2.0).exp() * (1.0 + c * xs_ * (1.0 + d * xs_)));
            let xs_ = a_s * (-x + 1.0).powi(2) / 4.0;
            let rs = (1.0 - xs_).sqrt();
            bvn += a
                * w
                * (-(bs / xs_ + hk) / 2.0).exp()
                * ((-hk * (1.0 - rs) / (2.0 * (1.0 + rs))).exp() / rs
                    - (1.0 + c * xs_ * (1.0 + d * xs_)));
        }
        bvn = -bvn / (2.0 * PI);
    }

    if r > 0.0 {
        bvn + norm_cdf(-h.max(k))
    } else {
        -bvn + (norm_cdf(-h) - norm_cdf(-k)).max(0.0)
    }
}

/// Bivariate standard normal CDF: M(a, b; ρ) = P(X ≤ a, Y ≤ b).
///
/// # Examples
/// ```
/// use pricer_models::analytical::{bivariate_norm_cdf, norm_cdf};
///
/// // Independent case factorises.
/// let m = bivariate_norm_cdf(0.3, -0.4, 0.0);
/// assert!((m - norm_cdf(0.3) * norm_cdf(-0.4)).abs() < 1e-12);
/// ```
pub fn bivariate_norm_cdf(a: f64, b: f64, rho: f64) -> f64 {
    bvnd(-a, -b, rho)
}

/// Bivariate normal CDF on dual arguments with a fixed correlation.
///
/// ∂M/∂a = φ(a)·Φ((b − ρa)/√(1 − ρ²)), symmetrically for b.
pub fn bivariate_norm_cdf_dual(a: Dual64, b: Dual64, rho: f64) -> Dual64 {
    let value = bivariate_norm_cdf(a.re, b.re, rho);
    let scale = (1.0 - rho * rho).sqrt();
    let d_a = norm_pdf(a.re) * norm_cdf((b.re - rho * a.re) / scale);
    let d_b = norm_pdf(b.re) * norm_cdf((a.re - rho * b.re) / scale);
    Dual64::new(value, d_a * a.eps + d_b * b.eps)
}
