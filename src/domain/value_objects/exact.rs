//! # Exact Decimal Conversion
//!
//! Lossless conversion of numeric inputs to [`Decimal`].
//!
//! Binary floating-point values are converted through their shortest
//! round-trip string (`1.1005_f64` becomes `"1.1005"`), never through
//! `Decimal::from_f64`, which would carry the binary representation error
//! into the decimal. NaN and infinities are rejected.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::value_objects::exact::ExactDecimal;
//! use rust_decimal::Decimal;
//!
//! assert_eq!(1.1005_f64.to_exact_decimal().unwrap(), Decimal::new(11005, 4));
//! assert!(f64::NAN.to_exact_decimal().is_err());
//! ```

use crate::domain::errors::{RateError, RateResult};
use rust_decimal::Decimal;

/// A value that converts losslessly to a [`Decimal`].
pub trait ExactDecimal {
    /// Converts the value to an exact decimal.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` if the value is not finite or cannot
    /// be represented without rounding.
    fn to_exact_decimal(&self) -> RateResult<Decimal>;
}

/// Parses a canonical decimal string, refusing to round.
///
/// # Errors
///
/// Returns `RateError::InvalidInput` if the text is not a plain decimal or does
/// not fit the decimal range exactly.
pub fn parse_exact(text: &str) -> RateResult<Decimal> {
    Decimal::from_str_exact(text.trim())
        .map_err(|e| RateError::invalid_input(format!("'{text}' is not an exact decimal: {e}")))
}

impl ExactDecimal for Decimal {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        Ok(*self)
    }
}

impl ExactDecimal for f64 {
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        if !self.is_finite() {
            return Err(RateError::invalid_input(format!(
                "non-finite value {self} has no decimal representation"
            )));
        }
        parse_exact(&self.to_string())
    }
}

impl ExactDecimal for f32 {
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        if !self.is_finite() {
            return Err(RateError::invalid_input(format!(
                "non-finite value {self} has no decimal representation"
            )));
        }
        parse_exact(&self.to_string())
    }
}

impl ExactDecimal for i64 {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ExactDecimal for u64 {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ExactDecimal for i32 {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ExactDecimal for u32 {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        Ok(Decimal::from(*self))
    }
}

impl ExactDecimal for str {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        parse_exact(self)
    }
}

impl ExactDecimal for String {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        parse_exact(self)
    }
}

impl<T: ExactDecimal + ?Sized> ExactDecimal for &T {
    #[inline]
    fn to_exact_decimal(&self) -> RateResult<Decimal> {
        (**self).to_exact_decimal()
    }
}

/// Converts every value of a slice, failing on the first invalid one.
///
/// # Errors
///
/// Returns the first conversion error encountered.
pub fn to_exact_decimals<T: ExactDecimal>(values: &[T]) -> RateResult<Vec<Decimal>> {
    values.iter().map(|value| value.to_exact_decimal()).collect()
}
