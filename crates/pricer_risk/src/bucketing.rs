//! Sensitivity bucketing onto curves and the volatility surface.
//!
//! - [`curve_sensitivities`]: point rate sensitivities keyed by curve name
//!   and payment time
//! - [`volatility_node_sensitivities`]: point vega spread over the surface
//!   grid by interpolation weight
//! - [`curve_node_sensitivities`]: point rate sensitivities projected onto
//!   the pillars of a curve (bucketed PV01)

use pricer_core::market_data::curves::PillarCurve;
use pricer_core::market_data::surfaces::SurfaceNodeWeights;
use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{Currency, CurrencyPair, PricingError};

use crate::result::{CurveSensitivity, VolatilityNodeSensitivities};

/// Labels point rate sensitivities `(currency, time, value)` with their
/// curve names.
///
/// Entries for the same currency and time are summed. The output keeps the
/// order of first appearance.
pub fn curve_sensitivities<S: MarketSnapshot + ?Sized>(
    snapshot: &S,
    points: &[(Currency, f64, f64)],
) -> Result<Vec<CurveSensitivity>, PricingError> {
    let mut out: Vec<CurveSensitivity> = Vec::with_capacity(points.len());
    for &(currency, time, value) in points {
        if let Some(existing) = out
            .iter_mut()
            .find(|s| s.currency == currency && s.time == time)
        {
            existing.value += value;
            continue;
        }
        out.push(CurveSensitivity {
            curve_name: snapshot.curve_name(currency)?,
            currency,
            time,
            value,
        });
    }
    Ok(out)
}

/// Multiplies the node weights of a volatility lookup by the point vega.
///
/// The node values sum to `point_vega` because the weights sum to one.
pub fn volatility_node_sensitivities(
    pair: CurrencyPair,
    point_vega: f64,
    weights: &SurfaceNodeWeights<f64>,
) -> VolatilityNodeSensitivities {
    VolatilityNodeSensitivities {
        pair,
        expiries: weights.expiries.clone(),
        strikes: weights.strikes.clone(),
        values: weights.scaled(point_vega),
    }
}

/// Projects point sensitivities onto the pillars of `curve`.
///
/// Returns `(pillar, sensitivity)` for every pillar, where each point
/// sensitivity contributes `value · ∂r(t)/∂r_j`. The caller passes the
/// sensitivities that belong to this curve.
///
/// # Errors
///
/// Propagates the curve's error for a time off its grid.
pub fn curve_node_sensitivities<C: PillarCurve<f64> + ?Sized>(
    curve: &C,
    sensitivities: &[CurveSensitivity],
) -> Result<Vec<(f64, f64)>, PricingError> {
    let mut nodes: Vec<(f64, f64)> = curve.pillars().iter().map(|&p| (p, 0.0)).collect();
    for sensitivity in sensitivities {
        let weights = curve.zero_rate_weights(sensitivity.time)?;
        for (node, w) in nodes.iter_mut().zip(weights) {
            node.1 += sensitivity.value * w;
        }
    }
    Ok(nodes)
}
