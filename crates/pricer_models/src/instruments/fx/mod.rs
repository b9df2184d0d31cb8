//! Foreign exchange option contracts.
//!
//! This module provides the four FX option families:
//! - [`FxVanillaOption`]: European call/put
//! - [`FxAmericanOption`]: American call/put
//! - [`FxDigitalOption`]: cash-or-nothing digital with a pay leg
//! - [`FxBarrierOption`]: single barrier with rebate
//!
//! [`FxOptionContract`] is the tagged union dispatched by the pricing engine.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::fx::{
//!     FxOptionContract, FxOptionTerms, FxOptionType, FxVanillaOption, PositionSide,
//! };
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
//! let terms = FxOptionTerms::new(
//!     pair,
//!     1.12,              // strike
//!     1.0,               // expiry (1 year)
//!     1.0,               // payment time
//!     1_000_000.0,       // notional (1M EUR)
//!     FxOptionType::Call,
//!     PositionSide::Long,
//! ).unwrap();
//!
//! let contract: FxOptionContract = FxVanillaOption::new(terms).into();
//! assert_eq!(contract.family(), "vanilla");
//! assert_eq!(contract.terms().strike(), 1.12);
//! ```

mod barrier;
mod digital;
mod option;

pub use barrier::{Barrier, BarrierDirection, FxBarrierOption, KnockType};
pub use digital::{FxDigitalOption, PayLeg};
pub use option::{FxAmericanOption, FxOptionTerms, FxOptionType, FxVanillaOption, PositionSide};

/// FX option contract for static dispatch over the option families.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FxOptionContract {
    /// European vanilla.
    Vanilla(FxVanillaOption),
    /// American vanilla.
    American(FxAmericanOption),
    /// Digital.
    Digital(FxDigitalOption),
    /// Single barrier.
    Barrier(FxBarrierOption),
}

impl FxOptionContract {
    /// Common terms.
    #[inline]
    pub fn terms(&self) -> &FxOptionTerms {
        match self {
            FxOptionContract::Vanilla(o) => o.terms(),
            FxOptionContract::American(o) => o.terms(),
            FxOptionContract::Digital(o) => o.terms(),
            FxOptionContract::Barrier(o) => o.terms(),
        }
    }

    /// Short family name used in logs.
    pub fn family(&self) -> &'static str {
        match self {
            FxOptionContract::Vanilla(_) => "vanilla",
            FxOptionContract::American(_) => "american",
            FxOptionContract::Digital(_) => "digital",
            FxOptionContract::Barrier(_) => "barrier",
        }
    }
}

impl From<FxVanillaOption> for FxOptionContract {
    fn from(option: FxVanillaOption) -> Self {
        FxOptionContract::Vanilla(option)
    }
}

impl From<FxAmericanOption> for FxOptionContract {
    fn from(option: FxAmericanOption) -> Self {
        FxOptionContract::American(option)
    }
}

impl From<FxDigitalOption> for FxOptionContract {
    fn from(option: FxDigitalOption) -> Self {
        FxOptionContract::Digital(option)
    }
}

impl From<FxBarrierOption> for FxOptionContract {
    fn from(option: FxBarrierOption) -> Self {
        FxOptionContract::Barrier(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Currency;

    fn terms() -> FxOptionTerms {
        FxOptionTerms::with_currencies(
            Currency::GBP,
            Currency::USD,
            1.3,
            0.5,
            0.51,
            250_000.0,
            FxOptionType::Put,
            PositionSide::Long,
        )
        .unwrap()
    }

    #[test]
    fn test_family_dispatch() {
        let vanilla: FxOptionContract = FxVanillaOption::new(terms()).into();
        let american: FxOptionContract = FxAmericanOption::new(terms()).into();
        let digital: FxOptionContract = FxDigitalOption::new(terms(), PayLeg::Domestic).into();
        let barrier = Barrier::new(1.4, BarrierDirection::Up, KnockType::Out).unwrap();
        let barrier: FxOptionContract =
            FxBarrierOption::new(FxVanillaOption::new(terms()), barrier, 0.0)
                .unwrap()
                .into();

        let families: Vec<_> = [vanilla, american, digital, barrier]
            .iter()
            .map(|c| c.family())
            .collect();
        assert_eq!(families, vec!["vanilla", "american", "digital", "barrier"]);
        assert_eq!(barrier.terms().payment_time(), 0.51);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip_preserves_variant() {
        let contract: FxOptionContract = FxDigitalOption::new(terms(), PayLeg::Foreign).into();
        let json = serde_json::to_string(&contract).unwrap();
        let back: FxOptionContract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contract);
    }
}
