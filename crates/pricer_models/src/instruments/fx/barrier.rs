//! Single-barrier FX options.
//!
//! A barrier option is a European vanilla that is activated (knock-in) or
//! extinguished (knock-out) when spot touches a barrier level. A rebate in
//! ccy2 compensates the holder when the option does not pay: at expiry for
//! a knock-in, at the hit for a knock-out.

use crate::instruments::InstrumentError;

use super::option::{FxOptionTerms, FxVanillaOption};

/// Side from which the barrier is approached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierDirection {
    /// Barrier above spot.
    Up,
    /// Barrier below spot.
    Down,
}

/// Whether touching the barrier activates or extinguishes the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockType {
    /// Option comes alive on touch.
    In,
    /// Option dies on touch.
    Out,
}

/// Barrier level and type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barrier {
    level: f64,
    direction: BarrierDirection,
    knock: KnockType,
}

impl Barrier {
    /// Creates a barrier.
    ///
    /// # Errors
    ///
    /// Returns `InstrumentError::InvalidBarrier` if the level is not positive and finite.
    pub fn new(level: f64, direction: BarrierDirection, knock: KnockType) -> Result<Self, InstrumentError> {
        if !(level.is_finite() && level > 0.0) {
            return Err(InstrumentError::InvalidBarrier { level });
        }
        Ok(Self {
            level,
            direction,
            knock,
        })
    }

    /// Barrier level in ccy2 per ccy1.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Up or down.
    #[inline]
    pub fn direction(&self) -> BarrierDirection {
        self.direction
    }

    /// In or out.
    #[inline]
    pub fn knock(&self) -> KnockType {
        self.knock
    }

    /// True when `spot` is at or beyond the barrier.
    #[inline]
    pub fn is_breached(&self, spot: f64) -> bool {
        match self.direction {
            BarrierDirection::Down => spot <= self.level,
            BarrierDirection::Up => spot >= self.level,
        }
    }
}

/// FX single-barrier option.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::fx::{
///     Barrier, BarrierDirection, FxBarrierOption, FxOptionTerms, FxOptionType,
///     FxVanillaOption, KnockType, PositionSide,
/// };
/// use pricer_core::types::Currency;
///
/// let terms = FxOptionTerms::with_currencies(
///     Currency::EUR, Currency::USD, 1.20, 1.0, 1.0, 1_000_000.0,
///     FxOptionType::Call, PositionSide::Long,
/// ).unwrap();
/// let barrier = Barrier::new(1.10, BarrierDirection::Down, KnockType::Out).unwrap();
/// let option = FxBarrierOption::new(FxVanillaOption::new(terms), barrier, 5_000.0).unwrap();
///
/// assert_eq!(option.rebate_per_foreign_unit(), 0.005);
/// assert!(option.barrier().is_breached(1.09));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxBarrierOption {
    underlying: FxVanillaOption,
    barrier: Barrier,
    rebate: f64,
}

impl FxBarrierOption {
    /// Creates a barrier option.
    ///
    /// # Arguments
    ///
    /// * `underlying` - The vanilla option that is knocked in or out
    /// * `barrier` - Barrier level and type
    /// * `rebate` - Rebate in ccy2 for the whole notional
    ///
    /// # Errors
    ///
    /// Returns `InstrumentError::InvalidRebate` for a non-finite rebate.
    pub fn new(underlying: FxVanillaOption, barrier: Barrier, rebate: f64) -> Result<Self, InstrumentError> {
        if !rebate.is_finite() {
            return Err(InstrumentError::InvalidRebate { rebate });
        }
        Ok(Self {
            underlying,
            barrier,
            rebate,
        })
    }

    /// Underlying vanilla.
    #[inline]
    pub fn underlying(&self) -> &FxVanillaOption {
        &self.underlying
    }

    /// Contract terms of the underlying.
    #[inline]
    pub fn terms(&self) -> &FxOptionTerms {
        self.underlying.terms()
    }

    /// Barrier.
    #[inline]
    pub fn barrier(&self) -> &Barrier {
        &self.barrier
    }

    /// Rebate in ccy2 for the whole notional.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Rebate per unit of ccy1 notional.
    pub fn rebate_per_foreign_unit(&self) -> f64 {
        self.rebate / self.terms().abs_notional()
    }

    /// Copy with a different expiry.
    pub fn with_expiry(&self, expiry: f64) -> Self {
        Self {
            underlying: FxVanillaOption::new(self.terms().with_expiry(expiry)),
            ..*self
        }
    }
}
