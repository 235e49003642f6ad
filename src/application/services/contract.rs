//! # Calculation Script Contracts
//!
//! Pluggable calculation scripts return untyped JSON. [`ContractCheckedCalculator`]
//! adapts a [`CalculationScript`] to [`RateCalculator`] and validates the shape
//! of every result before it reaches the caller:
//!
//! | result | required shape |
//! |---|---|
//! | rate pair | JSON array of exactly two numbers or exact decimal strings |
//! | scalar | a single number or exact decimal string |
//! | verdict | a JSON boolean |
//!
//! A result with any other shape is a `ContractViolation`. Results are never
//! coerced and never replaced with defaults.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::application::error::CalculatorResult;
//! use fx_rate_engine::application::services::calculator::RateCalculator;
//! use fx_rate_engine::application::services::contract::{CalculationScript, ContractCheckedCalculator};
//! use fx_rate_engine::domain::value_objects::RateType;
//! use rust_decimal::Decimal;
//! use serde_json::{Value, json};
//!
//! #[derive(Debug)]
//! struct ObjectMean;
//!
//! impl CalculationScript for ObjectMean {
//!     fn name(&self) -> &str {
//!         "object-mean"
//!     }
//!
//!     fn calculate_mean_rate(&self, _bids: &[Decimal], _asks: &[Decimal]) -> CalculatorResult<Value> {
//!         Ok(json!({ "bid": 1.0, "ask": 2.0 }))
//!     }
//! }
//!
//! let calculator = ContractCheckedCalculator::new(ObjectMean, RateType::usd_try());
//! let err = calculator.calculate_mean_rate(&[], &[]).unwrap_err();
//! assert!(err.is_contract_violation());
//! ```

use crate::application::error::{CalculatorError, CalculatorResult};
use crate::application::services::calculator::RateCalculator;
use crate::domain::entities::calculated_rate::CalculatedRate;
use crate::domain::entities::raw_rate::RawRate;
use crate::domain::errors::{RateError, RateResult};
use crate::domain::value_objects::exact::parse_exact;
use crate::domain::value_objects::rate_pair::RatePair;
use crate::domain::value_objects::rate_type::RateType;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::fmt;

/// A pluggable calculation script.
///
/// Every operation has a default that reports it as unsupported, so a script
/// only implements the operations it provides.
pub trait CalculationScript: Send + Sync + fmt::Debug {
    /// Returns the script name.
    fn name(&self) -> &str;

    /// Expected to return `[bid, ask]`.
    ///
    /// # Errors
    ///
    /// `CalculatorError::Unsupported` unless overridden.
    fn calculate_mean_rate(&self, _bids: &[Decimal], _asks: &[Decimal]) -> CalculatorResult<Value> {
        Err(CalculatorError::unsupported(self.name(), "calculate_mean_rate"))
    }

    /// Expected to return a boolean verdict.
    ///
    /// # Errors
    ///
    /// `CalculatorError::Unsupported` unless overridden.
    fn has_material_divergence(
        &self,
        _incoming: &RawRate,
        _mean: &RatePair,
    ) -> CalculatorResult<Value> {
        Err(CalculatorError::unsupported(self.name(), "has_material_divergence"))
    }

    /// Expected to return a single number.
    ///
    /// # Errors
    ///
    /// `CalculatorError::Unsupported` unless overridden.
    fn calculate_usd_mid(&self, _bids: &[Decimal], _asks: &[Decimal]) -> CalculatorResult<Value> {
        Err(CalculatorError::unsupported(self.name(), "calculate_usd_mid"))
    }

    /// Expected to return `[bid, ask]`.
    ///
    /// # Errors
    ///
    /// `CalculatorError::Unsupported` unless overridden.
    fn calculate_for_raw_rate_type(
        &self,
        _rate_type: &RateType,
        _usd_mid: Decimal,
        _bids: &[Decimal],
        _asks: &[Decimal],
    ) -> CalculatorResult<Value> {
        Err(CalculatorError::unsupported(
            self.name(),
            "calculate_for_raw_rate_type",
        ))
    }

    /// Expected to return `[bid, ask]`.
    ///
    /// # Errors
    ///
    /// `CalculatorError::Unsupported` unless overridden.
    fn calculate_for_base_rate(
        &self,
        _bids: &[Decimal],
        _asks: &[Decimal],
    ) -> CalculatorResult<Value> {
        Err(CalculatorError::unsupported(self.name(), "calculate_for_base_rate"))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    let text = number.to_string();
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text).ok()
    } else {
        Decimal::from_str_exact(&text).ok()
    }
}

fn numeric(operation: &str, value: &Value) -> RateResult<Decimal> {
    let decimal = match value {
        Value::Number(number) => number_to_decimal(number),
        Value::String(text) => parse_exact(text).ok(),
        other => {
            return Err(RateError::contract_violation(
                operation,
                format!("expected a number, got {}", kind(other)),
            ));
        }
    };
    decimal.ok_or_else(|| {
        RateError::contract_violation(
            operation,
            format!("{value} is not an exactly representable decimal"),
        )
    })
}

/// Validates a rate-pair result: an array of exactly two numeric elements.
///
/// # Errors
///
/// Returns `RateError::ContractViolation` for any other shape.
pub fn expect_rate_pair(operation: &str, value: &Value) -> RateResult<RatePair> {
    let Value::Array(items) = value else {
        return Err(RateError::contract_violation(
            operation,
            format!("expected an array of two numbers, got {}", kind(value)),
        ));
    };
    match items.as_slice() {
        [bid, ask] => Ok(RatePair::new(
            numeric(operation, bid)?,
            numeric(operation, ask)?,
        )),
        other => Err(RateError::contract_violation(
            operation,
            format!("expected an array of two numbers, got {} elements", other.len()),
        )),
    }
}

/// Validates a scalar result.
///
/// # Errors
///
/// Returns `RateError::ContractViolation` unless the value is numeric.
pub fn expect_decimal(operation: &str, value: &Value) -> RateResult<Decimal> {
    numeric(operation, value)
}

/// Validates a boolean result.
///
/// # Errors
///
/// Returns `RateError::ContractViolation` unless the value is a JSON boolean.
pub fn expect_bool(operation: &str, value: &Value) -> RateResult<bool> {
    value.as_bool().ok_or_else(|| {
        RateError::contract_violation(
            operation,
            format!("expected a boolean, got {}", kind(value)),
        )
    })
}

/// Adapts a [`CalculationScript`] to [`RateCalculator`], validating results.
#[derive(Debug, Clone)]
pub struct ContractCheckedCalculator<S> {
    script: S,
    base_rate_type: RateType,
}

impl<S: CalculationScript> ContractCheckedCalculator<S> {
    /// Wraps a script.
    #[must_use]
    pub fn new(script: S, base_rate_type: RateType) -> Self {
        Self {
            script,
            base_rate_type,
        }
    }

    /// Returns the wrapped script.
    #[must_use]
    pub fn script(&self) -> &S {
        &self.script
    }

    fn checked<T>(
        &self,
        operation: &str,
        result: CalculatorResult<Value>,
        validate: impl FnOnce(&str, &Value) -> RateResult<T>,
    ) -> CalculatorResult<T> {
        let value = result?;
        validate(operation, &value).map_err(|err| {
            tracing::warn!(
                script = self.script.name(),
                operation,
                error = %err,
                "script result rejected"
            );
            CalculatorError::from(err)
        })
    }
}

impl<S: CalculationScript> RateCalculator for ContractCheckedCalculator<S> {
    fn strategy(&self) -> &str {
        self.script.name()
    }

    fn base_rate_type(&self) -> &RateType {
        &self.base_rate_type
    }

    fn calculate_mean_rate(&self, bids: &[Decimal], asks: &[Decimal]) -> CalculatorResult<RatePair> {
        self.checked(
            "calculate_mean_rate",
            self.script.calculate_mean_rate(bids, asks),
            expect_rate_pair,
        )
    }

    fn has_material_divergence(&self, incoming: &RawRate, mean: &RatePair) -> CalculatorResult<bool> {
        self.checked(
            "has_material_divergence",
            self.script.has_material_divergence(incoming, mean),
            expect_bool,
        )
    }

    fn calculate_usd_mid(&self, bids: &[Decimal], asks: &[Decimal]) -> CalculatorResult<Decimal> {
        self.checked(
            "calculate_usd_mid",
            self.script.calculate_usd_mid(bids, asks),
            expect_decimal,
        )
    }

    fn calculate_for_raw_rate_type(
        &self,
        rate_type: &RateType,
        usd_mid: Decimal,
        bids: &[Decimal],
        asks: &[Decimal],
    ) -> CalculatorResult<CalculatedRate> {
        let pair = self.checked(
            "calculate_for_raw_rate_type",
            self.script
                .calculate_for_raw_rate_type(rate_type, usd_mid, bids, asks),
            expect_rate_pair,
        )?;
        Ok(CalculatedRate::new(
            rate_type.calculated_type(&self.base_rate_type),
            pair,
            Timestamp::now(),
        ))
    }

    fn calculate_for_base_rate(
        &self,
        bids: &[Decimal],
        asks: &[Decimal],
    ) -> CalculatorResult<CalculatedRate> {
        let pair = self.checked(
            "calculate_for_base_rate",
            self.script.calculate_for_base_rate(bids, asks),
            expect_rate_pair,
        )?;
        Ok(CalculatedRate::new(
            self.base_rate_type.clone(),
            pair,
            Timestamp::now(),
        ))
    }
}
