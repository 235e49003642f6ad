//! # Application Errors
//!
//! Error types for rate calculators and the rate calculation service.
//!
//! # Error Hierarchy
//!
//! ```text
//! CalculatorError
//! ├── Rate(RateError)                     - Domain arithmetic or contract failure
//! ├── Unsupported { strategy, operation } - Calculator does not provide the operation
//! ├── NoRates(RateType)                   - No quotes available for a pair
//! ├── MissingUsdMid(RateType)             - Cross pair requested without a USD mid-rate
//! └── Script { operation, message }       - A calculation script failed to run
//! ```
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::application::error::CalculatorError;
//! use fx_rate_engine::domain::errors::RateError;
//!
//! let err: CalculatorError = RateError::DivisionByZero.into();
//! assert!(err.is_division_by_zero());
//!
//! let err = CalculatorError::unsupported("faulty", "calculate_usd_mid");
//! assert!(!err.is_contract_violation());
//! ```

use crate::domain::errors::RateError;
use crate::domain::value_objects::rate_type::RateType;
use thiserror::Error;

/// Errors raised while calculating rates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    /// Domain failure.
    #[error(transparent)]
    Rate(#[from] RateError),

    /// The calculator does not implement the requested operation.
    #[error("calculator {strategy} does not support {operation}")]
    Unsupported {
        /// Calculator name.
        strategy: String,
        /// Missing operation.
        operation: String,
    },

    /// No quotes were available.
    #[error("no rates available for {0}")]
    NoRates(RateType),

    /// A cross pair was requested before any USD mid-rate was known.
    #[error("no USD mid-rate available to calculate {0}")]
    MissingUsdMid(RateType),

    /// A calculation script failed while running.
    #[error("script failed in {operation}: {message}")]
    Script {
        /// Operation being run.
        operation: String,
        /// Failure description.
        message: String,
    },
}

impl CalculatorError {
    /// Creates an unsupported-operation error.
    #[must_use]
    pub fn unsupported(strategy: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Unsupported {
            strategy: strategy.into(),
            operation: operation.into(),
        }
    }

    /// Creates a script failure error.
    #[must_use]
    pub fn script(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Script {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a contract violation error.
    #[must_use]
    pub fn contract_violation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rate(RateError::contract_violation(operation, reason))
    }

    /// Returns true if a result or parameter broke its contract.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Rate(err) if err.is_contract_violation())
    }

    /// Returns true if a division primitive saw a zero denominator.
    #[must_use]
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::Rate(err) if err.is_division_by_zero())
    }
}

/// Result type for calculator operations.
pub type CalculatorResult<T> = Result<T, CalculatorError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wraps_rate_errors_transparently() {
        let err = CalculatorError::from(RateError::DivisionByZero);
        assert_eq!(err.to_string(), "division by zero");
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn contract_violation_helper() {
        let err = CalculatorError::contract_violation("calculate_mean_rate", "expected array");
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("calculate_mean_rate"));
    }

    #[test]
    fn display_messages() {
        let usd_try = RateType::new("USD_TRY").unwrap();
        assert_eq!(
            CalculatorError::NoRates(usd_try.clone()).to_string(),
            "no rates available for USD_TRY"
        );
        assert_eq!(
            CalculatorError::MissingUsdMid(usd_try).to_string(),
            "no USD mid-rate available to calculate USD_TRY"
        );
        assert_eq!(
            CalculatorError::unsupported("faulty", "calculate_usd_mid").to_string(),
            "calculator faulty does not support calculate_usd_mid"
        );
    }
}
