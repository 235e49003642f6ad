//! # Precision Context
//!
//! Process-wide significant-digit precision for decimal rate arithmetic.
//!
//! Every arithmetic result produced by the decimal engine is rounded
//! half-to-even to the context's number of significant digits and then
//! normalized, so identical inputs always yield identical output.
//!
//! The context is installed at most once per process. Before installation,
//! [`PrecisionContext::current`] returns the default of 20 significant digits.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::value_objects::precision::PrecisionContext;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let ctx = PrecisionContext::new(5).unwrap();
//! let third = Decimal::ONE / Decimal::new(3, 0);
//! assert_eq!(ctx.apply(third).unwrap(), Decimal::from_str("0.33333").unwrap());
//! ```

use crate::domain::value_objects::arithmetic::{ArithmeticError, ArithmeticResult, Operation};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Default number of significant digits.
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 20;

/// Largest precision `rust_decimal` can carry.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 28;

static INSTALLED: OnceLock<PrecisionContext> = OnceLock::new();

/// Significant-digit precision applied to every decimal operation.
///
/// # Invariants
///
/// - `1 <= significant_digits <= 28`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrecisionContext {
    significant_digits: u32,
}

impl PrecisionContext {
    /// Creates a context with the given number of significant digits.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Precision` if `significant_digits` is zero
    /// or greater than [`MAX_SIGNIFICANT_DIGITS`].
    pub fn new(significant_digits: u32) -> ArithmeticResult<Self> {
        if significant_digits == 0 || significant_digits > MAX_SIGNIFICANT_DIGITS {
            return Err(ArithmeticError::Precision(
                "precision must be between 1 and 28 significant digits",
            ));
        }
        Ok(Self { significant_digits })
    }

    /// Returns the number of significant digits.
    #[inline]
    #[must_use]
    pub const fn significant_digits(&self) -> u32 {
        self.significant_digits
    }

    /// Installs this context as the process-wide precision.
    ///
    /// Installing the same context twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Precision` if a different context has
    /// already been installed.
    pub fn install(self) -> ArithmeticResult<()> {
        let installed = INSTALLED.get_or_init(|| self);
        if *installed == self {
            Ok(())
        } else {
            Err(ArithmeticError::Precision(
                "a different precision context is already installed",
            ))
        }
    }

    /// Returns the installed process-wide context, or the default one.
    #[must_use]
    pub fn current() -> Self {
        INSTALLED.get().copied().unwrap_or_default()
    }

    /// Rounds a value to this context's precision and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::OutOfRange` if rounding carries the value out of
    /// the representable range.
    pub fn apply(&self, value: Decimal) -> ArithmeticResult<Decimal> {
        if value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        value
            .round_sf_with_strategy(
                self.significant_digits,
                RoundingStrategy::MidpointNearestEven,
            )
            .map(|rounded| rounded.normalize())
            .ok_or(ArithmeticError::OutOfRange(Operation::Rounding))
    }
}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self {
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl fmt::Display for PrecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrecisionContext({} digits)", self.significant_digits)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_is_twenty_digits() {
        assert_eq!(PrecisionContext::default().significant_digits(), 20);
    }

    #[test]
    fn rejects_zero_digits() {
        assert!(PrecisionContext::new(0).is_err());
    }

    #[test]
    fn rejects_more_than_decimal_capacity() {
        assert!(PrecisionContext::new(29).is_err());
        assert!(PrecisionContext::new(28).is_ok());
    }

    #[test]
    fn apply_rounds_to_significant_digits() {
        let ctx = PrecisionContext::default();
        let third = Decimal::ONE / dec!(3);
        assert_eq!(ctx.apply(third).unwrap(), dec!(0.33333333333333333333));
    }

    #[test]
    fn apply_rounds_half_to_even() {
        let ctx = PrecisionContext::new(2).unwrap();
        assert_eq!(ctx.apply(dec!(1.25)).unwrap(), dec!(1.2));
        assert_eq!(ctx.apply(dec!(1.35)).unwrap(), dec!(1.4));
    }

    #[test]
    fn apply_normalizes_trailing_zeros() {
        let ctx = PrecisionContext::default();
        assert_eq!(ctx.apply(dec!(1.10060)).unwrap().to_string(), "1.1006");
        assert_eq!(ctx.apply(dec!(0.000)).unwrap().to_string(), "0");
    }

    #[test]
    fn apply_keeps_short_values_exact() {
        let ctx = PrecisionContext::default();
        assert_eq!(ctx.apply(dec!(1.1006)).unwrap(), dec!(1.1006));
    }

    #[test]
    fn current_defaults_when_nothing_installed() {
        // Tests never install a non-default context.
        assert_eq!(PrecisionContext::current(), PrecisionContext::default());
    }

    #[test]
    fn display_shows_digits() {
        assert_eq!(
            PrecisionContext::default().to_string(),
            "PrecisionContext(20 digits)"
        );
    }
}
