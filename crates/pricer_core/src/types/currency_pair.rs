//! Currency pair types for FX option pricing.
//!
//! A pair is an ordered `(base, quote)` tuple of distinct currencies. The
//! quoted rate is the number of quote units per unit of base. Pairs carry no
//! market state; spot rates live in the market snapshot.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
//! assert_eq!(pair.code(), "EUR/USD");
//!
//! let inverse = pair.inverse();
//! assert_eq!(inverse.base(), Currency::USD);
//! assert!(pair.matches(&inverse));
//! ```

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// An ordered pair of distinct currencies, `BASE/QUOTE`.
///
/// For an FX option the base currency is the foreign currency (ccy1, the
/// currency of the notional) and the quote currency is the domestic one
/// (ccy2, the currency of the strike and of the premium).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrency` if base and quote are the same.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::{Currency, CurrencyPair};
    ///
    /// assert!(CurrencyPair::new(Currency::USD, Currency::JPY).is_ok());
    /// assert!(CurrencyPair::new(Currency::USD, Currency::USD).is_err());
    /// ```
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Returns the base (foreign) currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote (domestic) currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns the pair with base and quote swapped.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Checks if this pair contains the given currency.
    #[inline]
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.quote == currency
    }

    /// True when `other` names the same two currencies in either orientation.
    #[inline]
    pub fn matches(&self, other: &CurrencyPair) -> bool {
        self == other || *self == other.inverse()
    }

    /// True when `other` is this pair in the opposite orientation.
    #[inline]
    pub fn is_inverse_of(&self, other: &CurrencyPair) -> bool {
        *self == other.inverse()
    }

    /// Returns the currency pair code in standard format (BASE/QUOTE).
    pub fn code(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses `"EUR/USD"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| CurrencyError::ParseError(s.to_string()))?;
        CurrencyPair::new(base.trim().parse()?, quote.trim().parse()?)
    }
}
