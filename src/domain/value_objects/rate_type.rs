//! # Rate Type
//!
//! Currency-pair codes such as `USD_TRY` or `EUR_USD`.
//!
//! A rate type is two three-letter uppercase currency codes joined by an
//! underscore: the base currency first, the quote currency second.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::value_objects::rate_type::RateType;
//!
//! let rate_type: RateType = "eur_usd".parse().unwrap();
//! assert_eq!(rate_type.as_str(), "EUR_USD");
//! assert_eq!(rate_type.base_currency(), "EUR");
//! assert_eq!(rate_type.quote_currency(), "USD");
//! ```

use crate::domain::errors::{RateError, RateResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of an ISO 4217 currency code.
const CURRENCY_CODE_LEN: usize = 3;

/// Default base rate type.
pub const USD_TRY: &str = "USD_TRY";

/// A validated currency-pair code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RateType(String);

impl RateType {
    /// Creates a rate type from a `BASE_QUOTE` code.
    ///
    /// Lowercase input is accepted and uppercased.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` if the code is not two three-letter
    /// alphabetic codes separated by `_`.
    pub fn new(code: impl AsRef<str>) -> RateResult<Self> {
        let code = code.as_ref().trim().to_ascii_uppercase();
        let valid = code
            .split_once('_')
            .is_some_and(|(base, quote)| is_currency_code(base) && is_currency_code(quote));
        if !valid {
            return Err(RateError::invalid_input(format!(
                "'{code}' is not a BASE_QUOTE currency pair"
            )));
        }
        Ok(Self(code))
    }

    /// The default base pair, `USD_TRY`.
    #[must_use]
    pub fn usd_try() -> Self {
        Self(USD_TRY.to_owned())
    }

    /// Creates a rate type from separate base and quote currencies.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` if either code is malformed.
    pub fn from_currencies(base: &str, quote: &str) -> RateResult<Self> {
        Self::new(format!("{base}_{quote}"))
    }

    /// Returns the code, e.g. `USD_TRY`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base currency, e.g. `USD` for `USD_TRY`.
    #[must_use]
    pub fn base_currency(&self) -> &str {
        self.0.get(..CURRENCY_CODE_LEN).unwrap_or_default()
    }

    /// Returns the quote currency, e.g. `TRY` for `USD_TRY`.
    #[must_use]
    pub fn quote_currency(&self) -> &str {
        self.0.get(CURRENCY_CODE_LEN + 1..).unwrap_or_default()
    }

    /// Returns the rate type a raw rate of this type is published as.
    ///
    /// The base rate type is published unchanged; every other pair keeps its
    /// base currency and is re-quoted in the base rate type's quote currency
    /// (`EUR_USD` becomes `EUR_TRY` when the base rate type is `USD_TRY`).
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_rate_engine::domain::value_objects::rate_type::RateType;
    ///
    /// let base = RateType::new("USD_TRY").unwrap();
    /// let eur_usd = RateType::new("EUR_USD").unwrap();
    /// assert_eq!(eur_usd.calculated_type(&base).as_str(), "EUR_TRY");
    /// assert_eq!(base.calculated_type(&base), base);
    /// ```
    #[must_use]
    pub fn calculated_type(&self, base_rate_type: &Self) -> Self {
        if self == base_rate_type {
            return self.clone();
        }
        Self(format!(
            "{}_{}",
            self.base_currency(),
            base_rate_type.quote_currency()
        ))
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == CURRENCY_CODE_LEN && code.bytes().all(|b| b.is_ascii_uppercase())
}

impl FromStr for RateType {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RateType {
    type Error = RateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RateType> for String {
    fn from(value: RateType) -> Self {
        value.0
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
