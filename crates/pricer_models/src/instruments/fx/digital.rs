//! Cash-or-nothing FX digital options.
//!
//! A digital pays a fixed amount if the option finishes in the money. The
//! payment leg decides the currency of the payout:
//!
//! - `PayLeg::Domestic`: pays `|N|·K` of ccy2
//! - `PayLeg::Foreign`: pays `|N|` of ccy1

use pricer_core::types::Currency;

use super::option::{FxOptionTerms, FxOptionType};

/// Currency leg in which a digital pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayLeg {
    /// Pays `|N|·K` units of ccy2.
    Domestic,
    /// Pays `|N|` units of ccy1.
    Foreign,
}

/// FX digital option.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::fx::{FxDigitalOption, FxOptionTerms, FxOptionType, PayLeg, PositionSide};
/// use pricer_core::types::Currency;
///
/// let terms = FxOptionTerms::with_currencies(
///     Currency::EUR, Currency::USD, 1.25, 0.5, 0.5, 2_000_000.0,
///     FxOptionType::Call, PositionSide::Long,
/// ).unwrap();
/// let digital = FxDigitalOption::new(terms, PayLeg::Foreign);
///
/// assert_eq!(digital.pay_currency(), Currency::EUR);
/// assert_eq!(digital.pay_strike(), 0.8);
/// assert_eq!(digital.pay_option_type(), FxOptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxDigitalOption {
    terms: FxOptionTerms,
    pay_leg: PayLeg,
}

impl FxDigitalOption {
    /// Creates a digital paying on the given leg.
    pub fn new(terms: FxOptionTerms, pay_leg: PayLeg) -> Self {
        Self { terms, pay_leg }
    }

    /// Contract terms.
    #[inline]
    pub fn terms(&self) -> &FxOptionTerms {
        &self.terms
    }

    /// Payment leg.
    #[inline]
    pub fn pay_leg(&self) -> PayLeg {
        self.pay_leg
    }

    /// Returns whether the payout is in ccy2.
    #[inline]
    pub fn pays_domestic(&self) -> bool {
        matches!(self.pay_leg, PayLeg::Domestic)
    }

    /// Currency of the payout; the "domestic" currency of the pricing orientation.
    pub fn pay_currency(&self) -> Currency {
        match self.pay_leg {
            PayLeg::Domestic => self.terms.domestic_currency(),
            PayLeg::Foreign => self.terms.foreign_currency(),
        }
    }

    /// The other currency; the "foreign" currency of the pricing orientation.
    pub fn other_currency(&self) -> Currency {
        match self.pay_leg {
            PayLeg::Domestic => self.terms.foreign_currency(),
            PayLeg::Foreign => self.terms.domestic_currency(),
        }
    }

    /// Strike in the pricing orientation: K, or 1/K when paying ccy1.
    pub fn pay_strike(&self) -> f64 {
        match self.pay_leg {
            PayLeg::Domestic => self.terms.strike(),
            PayLeg::Foreign => 1.0 / self.terms.strike(),
        }
    }

    /// Option type in the pricing orientation, complemented when paying ccy1.
    pub fn pay_option_type(&self) -> FxOptionType {
        match self.pay_leg {
            PayLeg::Domestic => self.terms.option_type(),
            PayLeg::Foreign => self.terms.option_type().complement(),
        }
    }

    /// Unsigned payout amount in the pay currency.
    pub fn payout_amount(&self) -> f64 {
        match self.pay_leg {
            PayLeg::Domestic => self.terms.abs_notional() * self.terms.strike(),
            PayLeg::Foreign => self.terms.abs_notional(),
        }
    }

    /// Copy with a different expiry.
    pub fn with_expiry(&self, expiry: f64) -> Self {
        Self {
            terms: self.terms.with_expiry(expiry),
            ..*self
        }
    }
}
