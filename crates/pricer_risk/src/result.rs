//! Pricing result shapes.
//!
//! - [`PricingResult`]: present value plus everything derived from it
//! - [`Greek`]: one sensitivity with its quote convention and method
//! - [`CurrencyExposure`]: two-currency decomposition of the present value
//! - [`CurveSensitivity`]: zero-rate sensitivity at a payment time
//! - [`VolatilityNodeSensitivities`]: vega bucketed on the surface grid

use std::fmt;

use pricer_core::types::{Currency, CurrencyAmount, CurrencyPair};
use serde::{Deserialize, Serialize};

/// Kind of Greek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GreekKind {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// Time decay.
    Theta,
    /// ∂²V/∂S∂σ
    Vanna,
    /// ∂²V/∂σ²
    Vomma,
}

impl GreekKind {
    /// Every kind, in reporting order.
    pub const ALL: [GreekKind; 6] = [
        GreekKind::Delta,
        GreekKind::Gamma,
        GreekKind::Vega,
        GreekKind::Theta,
        GreekKind::Vanna,
        GreekKind::Vomma,
    ];
}

impl fmt::Display for GreekKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GreekKind::Delta => "delta",
            GreekKind::Gamma => "gamma",
            GreekKind::Vega => "vega",
            GreekKind::Theta => "theta",
            GreekKind::Vanna => "vanna",
            GreekKind::Vomma => "vomma",
        };
        f.write_str(name)
    }
}

/// Underlying a sensitivity is taken against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnderlyingConvention {
    /// Spot FX rate.
    Spot,
    /// Forward FX rate.
    Forward,
}

/// Quote direction of the underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteConvention {
    /// Per unit of the quoted rate (domestic per foreign).
    Direct,
    /// Per unit of the inverse rate.
    Reciprocal,
}

impl QuoteConvention {
    /// Maps a `direct_quote` flag.
    #[inline]
    pub fn from_direct(direct_quote: bool) -> Self {
        if direct_quote {
            QuoteConvention::Direct
        } else {
            QuoteConvention::Reciprocal
        }
    }
}

/// Underlying and quote direction of a Greek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GreekConvention {
    /// Spot or forward.
    pub underlying: UnderlyingConvention,
    /// Direct or reciprocal.
    pub quote: QuoteConvention,
}

impl GreekConvention {
    /// Spot-based convention.
    #[inline]
    pub fn spot(direct_quote: bool) -> Self {
        Self {
            underlying: UnderlyingConvention::Spot,
            quote: QuoteConvention::from_direct(direct_quote),
        }
    }

    /// Forward-based convention.
    #[inline]
    pub fn forward(direct_quote: bool) -> Self {
        Self {
            underlying: UnderlyingConvention::Forward,
            quote: QuoteConvention::from_direct(direct_quote),
        }
    }
}

/// How a sensitivity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensitivityMethod {
    /// Differentiated alongside the price.
    Adjoint,
    /// Closed-form derivative formula.
    ClosedForm,
    /// Bump and reprice.
    FiniteDifference,
}

/// One Greek, per unit of notional with the position sign applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greek {
    /// Which Greek.
    pub kind: GreekKind,
    /// Value per unit of notional.
    pub value: f64,
    /// Currency the value is expressed in.
    pub currency: Currency,
    /// Absolute notional.
    pub notional: f64,
    /// Underlying and quote direction.
    pub convention: GreekConvention,
    /// How it was computed.
    pub method: SensitivityMethod,
}

impl Greek {
    /// Creates a Greek.
    pub fn new(
        kind: GreekKind,
        value: f64,
        currency: Currency,
        notional: f64,
        convention: GreekConvention,
        method: SensitivityMethod,
    ) -> Self {
        Self {
            kind,
            value,
            currency,
            notional,
            convention,
            method,
        }
    }

    /// `value · notional` in the Greek's currency.
    #[inline]
    pub fn amount(&self) -> CurrencyAmount {
        CurrencyAmount::new(self.currency, self.value * self.notional)
    }
}

/// Present value split into a foreign and a domestic amount.
///
/// `foreign · spot + domestic` equals the present value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyExposure {
    /// Amount in the foreign currency.
    pub foreign: CurrencyAmount,
    /// Amount in the domestic currency.
    pub domestic: CurrencyAmount,
}

impl CurrencyExposure {
    /// Both amounts converted into the domestic currency at `spot`.
    pub fn total_in_domestic(&self, spot: f64) -> CurrencyAmount {
        CurrencyAmount::new(
            self.domestic.currency(),
            self.foreign.amount() * spot + self.domestic.amount(),
        )
    }
}

/// Sensitivity to the zero rate of one discount curve at one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSensitivity {
    /// Name of the discount curve.
    pub curve_name: String,
    /// Currency of the curve.
    pub currency: Currency,
    /// Time of the rate in years.
    pub time: f64,
    /// ∂V/∂r in the present value currency.
    pub value: f64,
}

/// Vega distributed over the volatility surface grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityNodeSensitivities {
    /// Pair the surface is quoted in.
    pub pair: CurrencyPair,
    /// Expiry axis.
    pub expiries: Vec<f64>,
    /// Strike axis.
    pub strikes: Vec<f64>,
    /// Vega per `[expiry][strike]` node.
    pub values: Vec<Vec<f64>>,
}

impl VolatilityNodeSensitivities {
    /// Sum over every node.
    pub fn total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }
}

/// Full valuation of one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Present value.
    pub present_value: CurrencyAmount,
    /// Two-currency decomposition of the present value.
    pub currency_exposure: Option<CurrencyExposure>,
    /// Greeks that the snapshot could support.
    pub greeks: Vec<Greek>,
    /// Zero-rate sensitivities.
    pub curve_sensitivities: Vec<CurveSensitivity>,
    /// Bucketed vega.
    pub volatility_node_sensitivities: Option<VolatilityNodeSensitivities>,
}

impl PricingResult {
    /// Result holding only a present value.
    pub fn new(present_value: CurrencyAmount) -> Self {
        Self {
            present_value,
            currency_exposure: None,
            greeks: Vec::new(),
            curve_sensitivities: Vec::new(),
            volatility_node_sensitivities: None,
        }
    }

    /// First Greek of the given kind.
    pub fn greek(&self, kind: GreekKind) -> Option<&Greek> {
        self.greeks.iter().find(|g| g.kind == kind)
    }
}
