//! # Decimal Engine
//!
//! Exact-arithmetic primitives used by every rate calculation.
//!
//! Each primitive works on [`Decimal`] values and rounds its result to the
//! engine's [`PrecisionContext`]. Inputs are converted through
//! [`ExactDecimal`], so binary floats never leak representation error into a
//! calculation.
//!
//! The free functions [`mean`], [`percentage_difference`] and [`divide`] use
//! the process-wide precision context.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::services::decimal_engine;
//! use rust_decimal::Decimal;
//!
//! let mean = decimal_engine::mean(&[1.1005, 1.1007]).unwrap();
//! assert_eq!(mean, Decimal::new(11006, 4));
//!
//! let empty: [f64; 0] = [];
//! assert_eq!(decimal_engine::mean(&empty).unwrap(), Decimal::ZERO);
//! ```

use crate::domain::errors::{RateError, RateResult};
use crate::domain::value_objects::arithmetic::CheckedDecimal;
use crate::domain::value_objects::exact::ExactDecimal;
use crate::domain::value_objects::precision::PrecisionContext;
use rust_decimal::Decimal;

/// Exact decimal arithmetic bound to a precision context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalEngine {
    context: PrecisionContext,
}

impl DecimalEngine {
    /// Creates an engine with an explicit precision context.
    #[must_use]
    pub const fn new(context: PrecisionContext) -> Self {
        Self { context }
    }

    /// Creates an engine bound to the process-wide precision context.
    #[must_use]
    pub fn global() -> Self {
        Self::new(PrecisionContext::current())
    }

    /// Returns the precision context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> PrecisionContext {
        self.context
    }

    /// Arithmetic mean of `values`; zero for an empty slice.
    ///
    /// An empty slice is "no data", not a fault.
    ///
    /// # Errors
    ///
    /// - `RateError::InvalidInput` if a value is not exactly representable
    /// - `RateError::Overflow` if the sum leaves the decimal range
    pub fn mean<T: ExactDecimal>(&self, values: &[T]) -> RateResult<Decimal> {
        if values.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let mut sum = Decimal::ZERO;
        for value in values {
            sum = self.add(sum, value.to_exact_decimal()?)?;
        }

        self.divide(sum, Decimal::from(values.len()))
    }

    /// Computes `abs((a - b) / reference) * 100`.
    ///
    /// # Errors
    ///
    /// - `RateError::DivisionByZero` if `reference` is zero
    /// - `RateError::Overflow` if an intermediate result leaves the decimal range
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_rate_engine::domain::services::decimal_engine::DecimalEngine;
    /// use fx_rate_engine::domain::errors::RateError;
    /// use rust_decimal::Decimal;
    ///
    /// let engine = DecimalEngine::default();
    /// let pct = engine
    ///     .percentage_difference(Decimal::new(110, 2), Decimal::new(1111, 3), Decimal::new(110, 2))
    ///     .unwrap();
    /// assert_eq!(pct, Decimal::ONE);
    ///
    /// let err = engine
    ///     .percentage_difference(Decimal::ONE, Decimal::ONE, Decimal::ZERO)
    ///     .unwrap_err();
    /// assert_eq!(err, RateError::DivisionByZero);
    /// ```
    pub fn percentage_difference(
        &self,
        a: Decimal,
        b: Decimal,
        reference: Decimal,
    ) -> RateResult<Decimal> {
        if reference.is_zero() {
            return Err(RateError::DivisionByZero);
        }

        let difference = self.round(a.minus(b)?)?;
        let ratio = self.divide(difference, reference)?;
        let percent = self.multiply(ratio, Decimal::ONE_HUNDRED)?;

        Ok(percent.abs())
    }

    /// Divides `numerator` by `denominator`.
    ///
    /// # Errors
    ///
    /// - `RateError::DivisionByZero` if `denominator` is zero
    /// - `RateError::Overflow` if the quotient leaves the decimal range
    pub fn divide(&self, numerator: Decimal, denominator: Decimal) -> RateResult<Decimal> {
        let quotient = numerator.over(denominator)?;
        self.round(quotient)
    }

    /// Multiplies `a` by `b`.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Overflow` if the product leaves the decimal range.
    pub fn multiply(&self, a: Decimal, b: Decimal) -> RateResult<Decimal> {
        let product = a.times(b)?;
        self.round(product)
    }

    /// Adds `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Overflow` if the sum leaves the decimal range.
    pub fn add(&self, a: Decimal, b: Decimal) -> RateResult<Decimal> {
        let sum = a.plus(b)?;
        self.round(sum)
    }

    fn round(&self, value: Decimal) -> RateResult<Decimal> {
        Ok(self.context.apply(value)?)
    }
}

/// Mean of `values` under the process-wide precision context.
///
/// # Errors
///
/// See [`DecimalEngine::mean`].
pub fn mean<T: ExactDecimal>(values: &[T]) -> RateResult<Decimal> {
    DecimalEngine::global().mean(values)
}

/// Percentage difference under the process-wide precision context.
///
/// # Errors
///
/// See [`DecimalEngine::percentage_difference`].
pub fn percentage_difference(a: Decimal, b: Decimal, reference: Decimal) -> RateResult<Decimal> {
    DecimalEngine::global().percentage_difference(a, b, reference)
}

/// Division under the process-wide precision context.
///
/// # Errors
///
/// See [`DecimalEngine::divide`].
pub fn divide(numerator: Decimal, denominator: Decimal) -> RateResult<Decimal> {
    DecimalEngine::global().divide(numerator, denominator)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn engine() -> DecimalEngine {
        DecimalEngine::default()
    }

    mod mean {
        use super::*;

        #[test]
        fn exact_average_of_floats() {
            let mean = engine().mean(&[1.1005_f64, 1.1007]).unwrap();
            assert_eq!(mean, dec!(1.1006));
            assert_eq!(mean.to_string(), "1.1006");
        }

        #[test]
        fn empty_is_zero() {
            let empty: [Decimal; 0] = [];
            assert_eq!(engine().mean(&empty).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn single_value_is_itself() {
            assert_eq!(engine().mean(&[dec!(34.125)]).unwrap(), dec!(34.125));
        }

        #[test]
        fn averages_whole_quotes() {
            assert_eq!(engine().mean(&[8.0_f64, 2.0]).unwrap(), dec!(5));
            assert_eq!(engine().mean(&[6.0_f64, 2.0]).unwrap(), dec!(4));
        }

        #[test]
        fn tenths_do_not_drift() {
            assert_eq!(engine().mean(&[0.2_f64, 0.1]).unwrap(), dec!(0.15));
            assert_eq!(engine().mean(&[0.4_f64, 0.3]).unwrap(), dec!(0.35));
        }

        #[test]
        fn rounds_repeating_quotients_to_context() {
            let mean = engine().mean(&[dec!(1), dec!(1), dec!(2)]).unwrap();
            assert_eq!(mean, dec!(1.3333333333333333333));
        }

        #[test]
        fn rejects_nan() {
            assert!(matches!(
                engine().mean(&[1.0, f64::NAN]),
                Err(RateError::InvalidInput(_))
            ));
        }

        #[test]
        fn overflowing_sum_fails() {
            assert_eq!(
                engine().mean(&[Decimal::MAX, Decimal::MAX]),
                Err(RateError::Overflow)
            );
        }
    }

    mod percentage_difference {
        use super::*;

        #[test]
        fn computes_absolute_percent() {
            let pct = engine()
                .percentage_difference(dec!(1.12), dec!(1.1312), dec!(1.12))
                .unwrap();
            assert_eq!(pct, dec!(1));
        }

        #[test]
        fn is_absolute_in_both_directions() {
            let up = engine()
                .percentage_difference(dec!(100), dec!(102), dec!(100))
                .unwrap();
            let down = engine()
                .percentage_difference(dec!(102), dec!(100), dec!(100))
                .unwrap();
            assert_eq!(up, dec!(2));
            assert_eq!(down, dec!(2));
        }

        #[test]
        fn zero_reference_is_division_by_zero() {
            assert_eq!(
                engine().percentage_difference(dec!(1), dec!(2), Decimal::ZERO),
                Err(RateError::DivisionByZero)
            );
        }

        #[test]
        fn equal_values_have_no_difference() {
            assert_eq!(
                engine()
                    .percentage_difference(dec!(34.1), dec!(34.1), dec!(34.1))
                    .unwrap(),
                Decimal::ZERO
            );
        }
    }

    mod divide {
        use super::*;

        #[test]
        fn exact_division() {
            assert_eq!(engine().divide(dec!(2.2012), dec!(2)).unwrap(), dec!(1.1006));
        }

        #[test]
        fn zero_denominator_fails() {
            assert_eq!(
                engine().divide(dec!(1), Decimal::ZERO),
                Err(RateError::DivisionByZero)
            );
        }

        #[test]
        fn zero_numerator_is_zero() {
            assert_eq!(engine().divide(Decimal::ZERO, dec!(2)).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn honours_context_precision() {
            let narrow = DecimalEngine::new(PrecisionContext::new(4).unwrap());
            assert_eq!(narrow.divide(dec!(2), dec!(3)).unwrap(), dec!(0.6667));
        }
    }

    mod multiply {
        use super::*;

        #[test]
        fn cross_rate_product() {
            assert_eq!(
                engine().multiply(dec!(1.0850), dec!(34.15)).unwrap(),
                dec!(37.05275)
            );
        }

        #[test]
        fn overflow_fails() {
            assert_eq!(
                engine().multiply(Decimal::MAX, dec!(10)),
                Err(RateError::Overflow)
            );
        }
    }

    mod free_functions {
        use super::*;

        #[test]
        fn use_global_context() {
            assert_eq!(mean(&[1.1005_f64, 1.1007]).unwrap(), dec!(1.1006));
            assert_eq!(divide(dec!(1), dec!(4)).unwrap(), dec!(0.25));
            assert_eq!(
                percentage_difference(dec!(1.10), dec!(1.111), dec!(1.10)).unwrap(),
                dec!(1)
            );
        }
    }

    #[test]
    fn repeated_calls_are_byte_identical() {
        let quotes = [1.1005_f64, 1.1007, 1.1011, 1.0999];
        let first = engine().mean(&quotes).unwrap().to_string();
        for _ in 0..10 {
            assert_eq!(engine().mean(&quotes).unwrap().to_string(), first);
        }
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_mean_within_bounds(values in prop::collection::vec(price_strategy(), 1..20)) {
            let mean = engine().mean(&values).unwrap();
            let min = values.iter().copied().min().unwrap();
            let max = values.iter().copied().max().unwrap();
            prop_assert!(mean >= min);
            prop_assert!(mean <= max);
        }

        #[test]
        fn prop_percentage_difference_non_negative(
            a in price_strategy(),
            b in price_strategy(),
            reference in price_strategy(),
        ) {
            let pct = engine().percentage_difference(a, b, reference).unwrap();
            prop_assert!(!pct.is_sign_negative() || pct.is_zero());
        }

        #[test]
        fn prop_zero_reference_always_fails(a in price_strategy(), b in price_strategy()) {
            prop_assert_eq!(
                engine().percentage_difference(a, b, Decimal::ZERO),
                Err(RateError::DivisionByZero)
            );
        }
    }
}
