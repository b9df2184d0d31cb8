//! FX option terms and the European and American vanilla contracts.
//!
//! # Conventions
//!
//! - ccy1 (pair base) is the foreign currency, ccy2 (pair quote) the domestic
//! - Notional is in ccy1; its sign is ignored and `|notional|` is used
//! - Strike is quoted as units of ccy2 per unit of ccy1
//! - Values are settled in ccy2 unless the contract says otherwise
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::fx::{FxOptionTerms, FxOptionType, FxVanillaOption, PositionSide};
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
//! let option = FxVanillaOption::new(terms);
//!
//! assert_eq!(option.terms().strike(), 1.12);
//! assert_eq!(option.terms().domestic_currency(), Currency::USD);
//! ```

use pricer_core::types::{Currency, CurrencyPair};

use crate::instruments::InstrumentError;

/// FX option type (Call or Put).
///
/// - Call: Right to buy base currency, sell quote currency
/// - Put: Right to sell base currency, buy quote currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FxOptionType {
    /// Right to buy base currency at strike price in quote currency.
    Call,
    /// Right to sell base currency at strike price in quote currency.
    Put,
}

impl FxOptionType {
    /// Returns whether this is a call option.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, FxOptionType::Call)
    }

    /// Returns whether this is a put option.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, FxOptionType::Put)
    }

    /// +1 for a call, −1 for a put.
    #[inline]
    pub fn omega(&self) -> f64 {
        if self.is_call() {
            1.0
        } else {
            -1.0
        }
    }

    /// The opposite type, as seen from the other side of the currency pair.
    #[inline]
    pub fn complement(&self) -> Self {
        match self {
            FxOptionType::Call => FxOptionType::Put,
            FxOptionType::Put => FxOptionType::Call,
        }
    }
}

impl std::fmt::Display for FxOptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FxOptionType::Call => write!(f, "Call"),
            FxOptionType::Put => write!(f, "Put"),
        }
    }
}

/// Long or short position in the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionSide {
    /// Holder of the option.
    Long,
    /// Writer of the option.
    Short,
}

impl PositionSide {
    /// +1 for long, −1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }

    /// Returns whether this is a long position.
    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, PositionSide::Long)
    }
}

/// Terms shared by every FX option family.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxOptionTerms {
    pair: CurrencyPair,
    strike: f64,
    expiry: f64,
    payment_time: f64,
    notional: f64,
    option_type: FxOptionType,
    side: PositionSide,
}

impl FxOptionTerms {
    /// Creates validated option terms.
    ///
    /// # Arguments
    ///
    /// * `pair` - ccy1/ccy2, i.e. foreign/domestic
    /// * `strike` - ccy2 per unit of ccy1 (positive, finite)
    /// * `expiry` - Time to expiry in years (finite, non-negative)
    /// * `payment_time` - Time to settlement in years (finite, non-negative)
    /// * `notional` - Amount of ccy1 (finite; sign ignored)
    /// * `option_type` - Call or Put on ccy1
    /// * `side` - Long or Short
    ///
    /// Zero expiry is accepted; pricing then yields non-finite Greeks.
    ///
    /// # Errors
    ///
    /// Returns `InstrumentError` for a non-positive strike, a non-finite
    /// notional or a negative time.
    pub fn new(
        pair: CurrencyPair,
        strike: f64,
        expiry: f64,
        payment_time: f64,
        notional: f64,
        option_type: FxOptionType,
        side: PositionSide,
    ) -> Result<Self, InstrumentError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !notional.is_finite() {
            return Err(InstrumentError::InvalidNotional { notional });
        }
        validate_time("expiry", expiry)?;
        validate_time("payment time", payment_time)?;

        Ok(Self {
            pair,
            strike,
            expiry,
            payment_time,
            notional,
            option_type,
            side,
        })
    }

    /// Convenience constructor from two currencies.
    ///
    /// # Errors
    ///
    /// Fails with `InstrumentError::Currency` when the currencies are equal.
    #[allow(clippy::too_many_arguments)]
    pub fn with_currencies(
        foreign: Currency,
        domestic: Currency,
        strike: f64,
        expiry: f64,
        payment_time: f64,
        notional: f64,
        option_type: FxOptionType,
        side: PositionSide,
    ) -> Result<Self, InstrumentError> {
        let pair = CurrencyPair::new(foreign, domestic)?;
        Self::new(pair, strike, expiry, payment_time, notional, option_type, side)
    }

    /// Currency pair ccy1/ccy2.
    #[inline]
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// ccy1, the foreign currency.
    #[inline]
    pub fn foreign_currency(&self) -> Currency {
        self.pair.base()
    }

    /// ccy2, the domestic currency.
    #[inline]
    pub fn domestic_currency(&self) -> Currency {
        self.pair.quote()
    }

    /// Strike in ccy2 per ccy1.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Time to payment in years.
    #[inline]
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Notional as given.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// `|notional|`.
    #[inline]
    pub fn abs_notional(&self) -> f64 {
        self.notional.abs()
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> FxOptionType {
        self.option_type
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    /// Long or short.
    #[inline]
    pub fn side(&self) -> PositionSide {
        self.side
    }

    /// +1 long, −1 short.
    #[inline]
    pub fn sign(&self) -> f64 {
        self.side.sign()
    }

    /// Copy with a different expiry, used for time bumps.
    pub fn with_expiry(&self, expiry: f64) -> Self {
        Self { expiry, ..*self }
    }
}

fn validate_time(name: &'static str, time: f64) -> Result<(), InstrumentError> {
    if time.is_finite() && time >= 0.0 {
        Ok(())
    } else {
        Err(InstrumentError::InvalidTime { name, time })
    }
}

/// European vanilla FX option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxVanillaOption {
    terms: FxOptionTerms,
}

impl FxVanillaOption {
    /// Wraps validated terms.
    pub fn new(terms: FxOptionTerms) -> Self {
        Self { terms }
    }

    /// Contract terms.
    #[inline]
    pub fn terms(&self) -> &FxOptionTerms {
        &self.terms
    }
}

/// American vanilla FX option, exercisable at any time up to expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxAmericanOption {
    terms: FxOptionTerms,
}

impl FxAmericanOption {
    /// Wraps validated terms.
    pub fn new(terms: FxOptionTerms) -> Self {
        Self { terms }
    }

    /// Contract terms.
    #[inline]
    pub fn terms(&self) -> &FxOptionTerms {
        &self.terms
    }

    /// Early exercise eligibility; always true for this contract.
    #[inline]
    pub fn is_early_exercise_allowed(&self) -> bool {
        true
    }
}
