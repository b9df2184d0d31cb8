//! Currency exposure and quote-direction transforms.
//!
//! Greeks are computed against the direct quote (domestic per foreign).
//! The reciprocal quote is `1/S`, so with `x = 1/S`:
//!
//! ```text
//! ∂V/∂x     = −S² · ∂V/∂S
//! ∂²V/∂x²   = S³ · (S · ∂²V/∂S² + 2 · ∂V/∂S)
//! ∂²V/∂x∂σ  = −S² · ∂²V/∂S∂σ
//! ```
//!
//! Relative-spot variants report sensitivity to a relative move of the
//! rate, i.e. `S · ∂V/∂S` for the direct quote and `x · ∂V/∂x` for the
//! reciprocal one.

use pricer_core::types::{Currency, CurrencyAmount};

use crate::result::CurrencyExposure;

/// Splits a present value into foreign and domestic amounts.
///
/// * `spot_delta` - unsigned spot delta per unit of notional
/// * `notional` - notional (its sign is ignored)
/// * `sign` - `+1` long, `−1` short
/// * `present_value` - signed present value in `domestic`
///
/// The foreign amount is `δ·|N|·sign` and the domestic amount is
/// `present_value − δ·|N|·S·sign`, so the two convert back to the present
/// value at spot.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_risk::exposure::currency_exposure;
///
/// let e = currency_exposure(Currency::EUR, Currency::USD, 0.52, 1e6, 1.0, 1.2, 47_860.0);
/// assert!((e.foreign.amount() * 1.2 + e.domestic.amount() - 47_860.0).abs() < 1e-8);
/// ```
pub fn currency_exposure(
    foreign: Currency,
    domestic: Currency,
    spot_delta: f64,
    notional: f64,
    sign: f64,
    spot: f64,
    present_value: f64,
) -> CurrencyExposure {
    let foreign_amount = spot_delta * notional.abs() * sign;
    CurrencyExposure {
        foreign: CurrencyAmount::new(foreign, foreign_amount),
        domestic: CurrencyAmount::new(domestic, -foreign_amount * spot + present_value),
    }
}

/// Delta in the requested quote direction.
#[inline]
pub fn relative_delta(delta: f64, spot: f64, direct_quote: bool) -> f64 {
    if direct_quote {
        delta
    } else {
        -delta * spot * spot
    }
}

/// Gamma in the requested quote direction.
///
/// The reciprocal gamma needs the direct delta as well.
#[inline]
pub fn relative_gamma(gamma: f64, delta: f64, spot: f64, direct_quote: bool) -> f64 {
    if direct_quote {
        gamma
    } else {
        (gamma * spot + 2.0 * delta) * spot * spot * spot
    }
}

/// Vanna in the requested quote direction.
#[inline]
pub fn relative_vanna(vanna: f64, spot: f64, direct_quote: bool) -> f64 {
    if direct_quote {
        vanna
    } else {
        -vanna * spot * spot
    }
}

/// Delta to a relative move of the quoted rate.
#[inline]
pub fn relative_delta_spot(delta: f64, spot: f64, direct_quote: bool) -> f64 {
    let quoted = relative_delta(delta, spot, direct_quote);
    if direct_quote {
        quoted * spot
    } else {
        quoted / spot
    }
}

/// Gamma to a relative move of the quoted rate.
#[inline]
pub fn relative_gamma_spot(gamma: f64, delta: f64, spot: f64, direct_quote: bool) -> f64 {
    let quoted = relative_gamma(gamma, delta, spot, direct_quote);
    if direct_quote {
        quoted * spot
    } else {
        quoted / spot
    }
}

/// Forward delta from spot delta, `δ_spot / df_foreign`.
#[inline]
pub fn forward_delta_from_spot(spot_delta: f64, df_foreign: f64) -> f64 {
    spot_delta / df_foreign
}

/// Forward gamma from spot gamma, `γ_spot · df_domestic / df_foreign²`.
#[inline]
pub fn forward_gamma_from_spot(spot_gamma: f64, df_domestic: f64, df_foreign: f64) -> f64 {
    spot_gamma * df_domestic / (df_foreign * df_foreign)
}

/// Maps sensitivities to `(r, b = r − r_foreign)` onto the two curves.
///
/// Returns `(domestic, foreign)` = `(∂V/∂r + ∂V/∂b, −∂V/∂b)`.
#[inline]
pub fn carry_chain_rule(d_rate: f64, d_carry: f64) -> (f64, f64) {
    (d_rate + d_carry, -d_carry)
}
