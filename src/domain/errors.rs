//! # Domain Errors
//!
//! Error types for rate calculation in the domain layer.
//!
//! # Error Kinds
//!
//! ```text
//! RateError
//! ├── DivisionByZero                     - Zero denominator reached a division primitive
//! ├── ContractViolation { operation, .. } - A result or parameter broke its shape contract
//! ├── InvalidInput(String)                - Input not exactly representable as a decimal
//! └── Overflow                            - Result outside the decimal range
//! ```
//!
//! An empty quote batch is *not* an error: means of empty batches are zero.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Errors raised by the decimal engine, aggregator and divergence detector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// A division primitive received a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// A computed result or a caller-supplied parameter did not match its contract.
    #[error("contract violation in {operation}: {reason}")]
    ContractViolation {
        /// The operation whose contract was violated.
        operation: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// An input value cannot be represented exactly as a decimal.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The result does not fit the decimal range.
    #[error("arithmetic overflow")]
    Overflow,
}

impl RateError {
    /// Creates a contract violation error.
    #[must_use]
    pub fn contract_violation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns true if this is a division by zero.
    #[must_use]
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero)
    }

    /// Returns true if this is a contract violation.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}

impl From<ArithmeticError> for RateError {
    fn from(error: ArithmeticError) -> Self {
        match error {
            ArithmeticError::DivisionByZero => Self::DivisionByZero,
            ArithmeticError::OutOfRange(_) => Self::Overflow,
            ArithmeticError::Precision(msg) => Self::InvalidInput(msg.to_string()),
        }
    }
}

/// Result type for domain rate operations.
pub type RateResult<T> = Result<T, RateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::arithmetic::Operation;

    #[test]
    fn contract_violation_names_operation() {
        let err = RateError::contract_violation("calculate_mean_rate", "expected an array");
        assert!(err.is_contract_violation());
        assert!(!err.is_division_by_zero());
        assert_eq!(
            err.to_string(),
            "contract violation in calculate_mean_rate: expected an array"
        );
    }

    #[test]
    fn division_by_zero_from_arithmetic() {
        let err: RateError = ArithmeticError::DivisionByZero.into();
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn out_of_range_is_overflow_for_every_step() {
        for operation in [Operation::Sum, Operation::Difference, Operation::Rounding] {
            assert_eq!(
                RateError::from(ArithmeticError::OutOfRange(operation)),
                RateError::Overflow
            );
        }
    }

    #[test]
    fn refused_precision_becomes_invalid_input() {
        let err: RateError = ArithmeticError::Precision("bad precision").into();
        assert_eq!(err, RateError::InvalidInput("bad precision".to_string()));
    }
}
