//! # Calculation Policies
//!
//! Validated parameters that shape rate calculations:
//! - [`DivergenceThreshold`]: percentage at which two snapshots count as diverged
//! - [`MidDivisor`]: normalization factor for the USD mid-rate
//!
//! Both reject invalid values at construction, so the arithmetic that uses
//! them never sees a negative threshold or a zero divisor.

use crate::domain::errors::{RateError, RateResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage threshold for material divergence (inclusive).
///
/// The default is `1.0`, i.e. one percent.
///
/// # Examples
///
/// ```
/// use fx_rate_engine::domain::value_objects::policy::DivergenceThreshold;
/// use rust_decimal::Decimal;
///
/// assert_eq!(DivergenceThreshold::default().value(), Decimal::ONE);
/// assert!(DivergenceThreshold::new(Decimal::NEGATIVE_ONE).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DivergenceThreshold(Decimal);

impl DivergenceThreshold {
    /// Creates a threshold in percent.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` if the threshold is negative.
    pub fn new(percent: Decimal) -> RateResult<Self> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(RateError::invalid_input(format!(
                "divergence threshold must be non-negative, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    /// Returns the threshold in percent.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if `average_percent` meets or exceeds the threshold.
    #[inline]
    #[must_use]
    pub fn is_met_by(&self, average_percent: Decimal) -> bool {
        average_percent >= self.0
    }
}

impl Default for DivergenceThreshold {
    fn default() -> Self {
        Self(Decimal::ONE)
    }
}

impl TryFrom<Decimal> for DivergenceThreshold {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DivergenceThreshold> for Decimal {
    fn from(value: DivergenceThreshold) -> Self {
        value.0
    }
}

impl fmt::Display for DivergenceThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Non-zero divisor applied to `bid_mean + ask_mean` to derive a mid-rate.
///
/// There is no default: the divisor is a required configuration value. Use
/// [`MidDivisor::TWO`] for a true mid-price.
///
/// # Examples
///
/// ```
/// use fx_rate_engine::domain::value_objects::policy::MidDivisor;
/// use rust_decimal::Decimal;
///
/// assert_eq!(MidDivisor::TWO.value(), Decimal::TWO);
/// let err = MidDivisor::new(Decimal::ZERO).unwrap_err();
/// assert!(err.is_contract_violation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MidDivisor(Decimal);

impl MidDivisor {
    /// The divisor for a true mid-price.
    pub const TWO: Self = Self(Decimal::TWO);

    /// Creates a divisor.
    ///
    /// # Errors
    ///
    /// Returns `RateError::ContractViolation` if the divisor is zero. A zero
    /// divisor is a configuration defect, not a data-dependent fault.
    pub fn new(divisor: Decimal) -> RateResult<Self> {
        if divisor.is_zero() {
            return Err(RateError::contract_violation(
                "mid_divisor",
                "the mid-rate divisor must be non-zero",
            ));
        }
        Ok(Self(divisor))
    }

    /// Returns the divisor.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for MidDivisor {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MidDivisor> for Decimal {
    fn from(value: MidDivisor) -> Self {
        value.0
    }
}

impl fmt::Display for MidDivisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
