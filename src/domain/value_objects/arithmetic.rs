//! # Checked Decimal Operations
//!
//! The rate engine never lets a `rust_decimal` operator panic. Each step goes
//! through [`CheckedDecimal`], which turns the `None` of the checked operators
//! into an [`ArithmeticError`] naming the [`Operation`] that failed.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::value_objects::arithmetic::{ArithmeticError, CheckedDecimal, Operation};
//! use rust_decimal::Decimal;
//!
//! let bid = Decimal::new(3410, 2);
//! assert_eq!(bid.over(Decimal::TWO), Ok(Decimal::new(1705, 2)));
//! assert_eq!(bid.over(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
//! assert_eq!(
//!     Decimal::MAX.plus(bid),
//!     Err(ArithmeticError::OutOfRange(Operation::Sum))
//! );
//! ```

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// A step of a rate calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Accumulating quotes.
    Sum,
    /// Bid or ask spread against a reference.
    Difference,
    /// Applying a mid-rate or scaling to percent.
    Product,
    /// Averaging or normalising against a reference.
    Quotient,
    /// Reducing to the configured significant digits.
    Rounding,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sum => "sum",
            Self::Difference => "difference",
            Self::Product => "product",
            Self::Quotient => "quotient",
            Self::Rounding => "rounding",
        };
        f.write_str(name)
    }
}

/// Failure of a single decimal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// The result left the range of `Decimal` in either direction.
    #[error("{0} left the decimal range")]
    OutOfRange(Operation),

    /// A quotient had a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A precision setting was refused.
    #[error("precision refused: {0}")]
    Precision(&'static str),
}

impl ArithmeticError {
    /// Returns the failed operation, if the error came from one.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::OutOfRange(operation) => Some(*operation),
            Self::DivisionByZero => Some(Operation::Quotient),
            Self::Precision(_) => None,
        }
    }
}

/// Result type for decimal steps.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Non-panicking decimal operators.
pub trait CheckedDecimal: Sized {
    /// `self + rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::OutOfRange(Operation::Sum)` past either bound.
    fn plus(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self - rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::OutOfRange(Operation::Difference)` past either bound.
    fn minus(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self * rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::OutOfRange(Operation::Product)` past either bound.
    fn times(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self / rhs`.
    ///
    /// # Errors
    ///
    /// - `ArithmeticError::DivisionByZero` for a zero `rhs`
    /// - `ArithmeticError::OutOfRange(Operation::Quotient)` past either bound
    fn over(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedDecimal for Decimal {
    #[inline]
    fn plus(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs)
            .ok_or(ArithmeticError::OutOfRange(Operation::Sum))
    }

    #[inline]
    fn minus(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs)
            .ok_or(ArithmeticError::OutOfRange(Operation::Difference))
    }

    #[inline]
    fn times(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs)
            .ok_or(ArithmeticError::OutOfRange(Operation::Product))
    }

    #[inline]
    fn over(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs)
            .ok_or(ArithmeticError::OutOfRange(Operation::Quotient))
    }
}
