//! # Rate Calculators
//!
//! The [`RateCalculator`] trait is the fixed interface every calculation
//! strategy implements. [`DecimalRateCalculator`] is the native strategy built
//! on the domain services.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::application::services::calculator::{DecimalRateCalculator, RateCalculator};
//! use rust_decimal::Decimal;
//!
//! let calculator = DecimalRateCalculator::default();
//! let mid = calculator
//!     .calculate_usd_mid(&[Decimal::from(8), Decimal::from(2)], &[Decimal::from(6), Decimal::from(2)])
//!     .unwrap();
//! assert_eq!(mid, Decimal::new(45, 1));
//! ```

use crate::application::error::CalculatorResult;
use crate::domain::entities::calculated_rate::CalculatedRate;
use crate::domain::entities::raw_rate::RawRate;
use crate::domain::services::aggregator::Aggregator;
use crate::domain::services::decimal_engine::DecimalEngine;
use crate::domain::services::divergence::DivergenceDetector;
use crate::domain::value_objects::policy::{DivergenceThreshold, MidDivisor};
use crate::domain::value_objects::precision::PrecisionContext;
use crate::domain::value_objects::rate_pair::RatePair;
use crate::domain::value_objects::rate_type::RateType;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::infrastructure::config::{ConfigResult, EngineConfig};
use rust_decimal::Decimal;
use std::fmt;

/// Name of the native calculator.
pub const DECIMAL_STRATEGY: &str = "decimal";

/// A rate calculation strategy.
///
/// Implementations must be thread-safe (`Send + Sync`) so they can be shared
/// behind an `Arc`.
pub trait RateCalculator: Send + Sync + fmt::Debug {
    /// Returns the strategy name.
    fn strategy(&self) -> &str;

    /// Returns the pair quoted directly against the target currency.
    fn base_rate_type(&self) -> &RateType;

    /// Mean bid and mean ask of a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot produce a valid pair.
    fn calculate_mean_rate(&self, bids: &[Decimal], asks: &[Decimal]) -> CalculatorResult<RatePair>;

    /// Returns true if `mean` diverges materially from `incoming`.
    ///
    /// `incoming` is the reference (old) side, so each percentage is taken
    /// relative to the incoming bid or ask.
    ///
    /// # Errors
    ///
    /// Returns an error if the comparison cannot be made, e.g. a zero incoming
    /// bid or ask.
    fn has_material_divergence(&self, incoming: &RawRate, mean: &RatePair) -> CalculatorResult<bool>;

    /// USD mid-rate of a base-pair batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot produce a valid decimal.
    fn calculate_usd_mid(&self, bids: &[Decimal], asks: &[Decimal]) -> CalculatorResult<Decimal>;

    /// Cross-rate for `rate_type` through `usd_mid`, published under the
    /// converted rate type.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot produce a valid pair.
    fn calculate_for_raw_rate_type(
        &self,
        rate_type: &RateType,
        usd_mid: Decimal,
        bids: &[Decimal],
        asks: &[Decimal],
    ) -> CalculatorResult<CalculatedRate>;

    /// Calculated rate for the base pair itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy cannot produce a valid pair.
    fn calculate_for_base_rate(
        &self,
        bids: &[Decimal],
        asks: &[Decimal],
    ) -> CalculatorResult<CalculatedRate>;
}

/// Native exact-decimal calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalRateCalculator {
    aggregator: Aggregator,
    detector: DivergenceDetector,
    divisor: MidDivisor,
    base_rate_type: RateType,
}

impl DecimalRateCalculator {
    /// Creates a calculator.
    #[must_use]
    pub fn new(
        engine: DecimalEngine,
        threshold: DivergenceThreshold,
        divisor: MidDivisor,
        base_rate_type: RateType,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(engine),
            detector: DivergenceDetector::new(engine, threshold),
            divisor,
            base_rate_type,
        }
    }

    /// Creates a calculator from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the configuration fails validation.
    pub fn from_config(config: &EngineConfig) -> ConfigResult<Self> {
        Ok(Self::new(
            DecimalEngine::new(config.precision_context()?),
            config.threshold()?,
            config.divisor()?,
            config.base_pair()?,
        ))
    }

    /// Returns the mid-rate divisor.
    #[inline]
    #[must_use]
    pub const fn divisor(&self) -> MidDivisor {
        self.divisor
    }

    /// Returns the divergence threshold.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> DivergenceThreshold {
        self.detector.threshold()
    }
}

impl Default for DecimalRateCalculator {
    /// Default precision and threshold, a divisor of two and `USD_TRY` as the
    /// base pair.
    fn default() -> Self {
        Self::new(
            DecimalEngine::new(PrecisionContext::default()),
            DivergenceThreshold::default(),
            MidDivisor::TWO,
            RateType::usd_try(),
        )
    }
}

impl RateCalculator for DecimalRateCalculator {
    fn strategy(&self) -> &str {
        DECIMAL_STRATEGY
    }

    fn base_rate_type(&self) -> &RateType {
        &self.base_rate_type
    }

    fn calculate_mean_rate(&self, bids: &[Decimal], asks: &[Decimal]) -> CalculatorResult<RatePair> {
        let mean = self.aggregator.mean_rate(bids, asks)?;
        tracing::debug!(bids = bids.len(), asks = asks.len(), mean = %mean, "calculated mean rate");
        Ok(mean)
    }

    fn has_material_divergence(&self, incoming: &RawRate, mean: &RatePair) -> CalculatorResult<bool> {
        Ok(self.detector.has_material_divergence(&incoming.pair(), mean)?)
    }

    fn calculate_usd_mid(&self, bids: &[Decimal], asks: &[Decimal]) -> CalculatorResult<Decimal> {
        let mid = self.aggregator.usd_mid(bids, asks, self.divisor)?;
        tracing::debug!(mid = %mid, divisor = %self.divisor, "calculated USD mid-rate");
        Ok(mid)
    }

    fn calculate_for_raw_rate_type(
        &self,
        rate_type: &RateType,
        usd_mid: Decimal,
        bids: &[Decimal],
        asks: &[Decimal],
    ) -> CalculatorResult<CalculatedRate> {
        let pair = self.aggregator.apply_mid_rate(usd_mid, bids, asks)?;
        let calculated_type = rate_type.calculated_type(&self.base_rate_type);
        tracing::debug!(
            rate_type = %rate_type,
            calculated_type = %calculated_type,
            rate = %pair,
            "calculated cross rate"
        );
        Ok(CalculatedRate::new(calculated_type, pair, Timestamp::now()))
    }

    fn calculate_for_base_rate(
        &self,
        bids: &[Decimal],
        asks: &[Decimal],
    ) -> CalculatorResult<CalculatedRate> {
        let pair = self.aggregator.identity_rate(bids, asks)?;
        Ok(CalculatedRate::new(
            self.base_rate_type.clone(),
            pair,
            Timestamp::now(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn calculator() -> DecimalRateCalculator {
        DecimalRateCalculator::default()
    }

    fn raw(bid: f64, ask: f64) -> RawRate {
        RawRate::new("PF1", RateType::usd_try(), bid, ask, Timestamp::now()).unwrap()
    }

    #[test]
    fn is_object_safe_and_shareable() {
        let shared: Arc<dyn RateCalculator> = Arc::new(calculator());
        assert_eq!(shared.strategy(), DECIMAL_STRATEGY);
        assert_eq!(shared.base_rate_type().as_str(), "USD_TRY");
    }

    mod mean_rate {
        use super::*;

        #[test]
        fn averages_batch() {
            let pair = calculator()
                .calculate_mean_rate(&[dec!(1.1005), dec!(1.1007)], &[dec!(1.1009), dec!(1.1011)])
                .unwrap();
            assert_eq!(pair, RatePair::new(dec!(1.1006), dec!(1.1010)));
        }

        #[test]
        fn empty_batch_is_zero_pair() {
            assert!(calculator().calculate_mean_rate(&[], &[]).unwrap().is_zero());
        }
    }

    mod divergence {
        use super::*;

        #[test]
        fn incoming_is_reference() {
            // 0.995 off is 0.995% of 100 but 1.005% of 99.005
            let mean = RatePair::new(dec!(99.005), dec!(99.005));
            assert!(!calculator().has_material_divergence(&raw(100.0, 100.0), &mean).unwrap());

            let mean = RatePair::new(dec!(100), dec!(100));
            assert!(calculator().has_material_divergence(&raw(99.005, 99.005), &mean).unwrap());
        }

        #[test]
        fn close_rate_is_accepted() {
            let mean = RatePair::new(dec!(34.10), dec!(34.20));
            assert!(!calculator().has_material_divergence(&raw(34.12, 34.22), &mean).unwrap());
        }

        #[test]
        fn zero_incoming_is_division_by_zero() {
            let mean = RatePair::new(dec!(1), dec!(1));
            let err = calculator()
                .has_material_divergence(&raw(0.0, 0.0), &mean)
                .unwrap_err();
            assert!(err.is_division_by_zero());
        }

        #[test]
        fn zero_mean_is_full_divergence() {
            assert!(calculator()
                .has_material_divergence(&raw(1.0, 1.0), &RatePair::zero())
                .unwrap());
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn usd_mid_uses_configured_divisor() {
            let mid = calculator()
                .calculate_usd_mid(&[dec!(34.10)], &[dec!(34.20)])
                .unwrap();
            assert_eq!(mid, dec!(34.15));
        }

        #[test]
        fn cross_rate_is_published_under_converted_type() {
            let eur_usd = RateType::new("EUR_USD").unwrap();
            let rate = calculator()
                .calculate_for_raw_rate_type(&eur_usd, dec!(34.15), &[dec!(1.085)], &[dec!(1.086)])
                .unwrap();
            assert_eq!(rate.rate_type().as_str(), "EUR_TRY");
            assert_eq!(rate.pair(), RatePair::new(dec!(37.05275), dec!(37.0869)));
        }

        #[test]
        fn base_rate_is_identity() {
            let rate = calculator()
                .calculate_for_base_rate(&[dec!(34.10), dec!(34.12)], &[dec!(34.20), dec!(34.22)])
                .unwrap();
            assert_eq!(rate.rate_type().as_str(), "USD_TRY");
            assert_eq!(rate.pair(), RatePair::new(dec!(34.11), dec!(34.21)));
        }
    }

    #[test]
    fn from_config_uses_configured_values() {
        let config = EngineConfig::from_toml_str(
            r#"
            precision = 10
            divergence_threshold = "0.5"
            mid_divisor = "4"
            base_rate_type = "USD_TRY"
            "#,
        )
        .unwrap();
        let calculator = DecimalRateCalculator::from_config(&config).unwrap();
        assert_eq!(calculator.divisor().value(), dec!(4));
        assert_eq!(calculator.threshold().value(), dec!(0.5));
    }
}
