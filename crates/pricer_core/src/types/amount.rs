//! Amounts tagged with their currency.

use std::fmt;
use std::ops::{Mul, Neg};

use super::currency::Currency;

/// A monetary amount in a specific currency.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Currency, CurrencyAmount};
///
/// let pv = CurrencyAmount::new(Currency::USD, 47_860.0);
/// assert_eq!(pv.currency(), Currency::USD);
/// assert_eq!((-pv).amount(), -47_860.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount in `currency`.
    #[inline]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// A zero amount in `currency`.
    #[inline]
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// Currency of the amount.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The numeric amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds `other` if it shares this currency, `None` otherwise.
    pub fn checked_add(&self, other: &CurrencyAmount) -> Option<CurrencyAmount> {
        (self.currency == other.currency)
            .then(|| CurrencyAmount::new(self.currency, self.amount + other.amount))
    }

    /// Converts into `target` using the rate quoted as units of `target` per
    /// unit of this amount's currency.
    #[inline]
    pub fn convert(&self, target: Currency, rate: f64) -> CurrencyAmount {
        CurrencyAmount::new(target, self.amount * rate)
    }
}

impl Neg for CurrencyAmount {
    type Output = CurrencyAmount;

    fn neg(self) -> Self::Output {
        CurrencyAmount::new(self.currency, -self.amount)
    }
}

impl Mul<f64> for CurrencyAmount {
    type Output = CurrencyAmount;

    fn mul(self, rhs: f64) -> Self::Output {
        CurrencyAmount::new(self.currency, self.amount * rhs)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}
