//! # Rate Calculation Service
//!
//! Orchestrates a [`RateCalculator`] over batches of raw rates:
//!
//! 1. Screen each incoming rate against the mean of the rates already held
//!    for its pair and discard it if it diverges. A provider's first quote
//!    for a pair is accepted unscreened.
//! 2. When base-pair rates are available, derive the USD mid-rate.
//! 3. Publish the base pair as-is and convert every other pair through the
//!    USD mid-rate.

use crate::application::error::{CalculatorError, CalculatorResult};
use crate::application::services::calculator::{DecimalRateCalculator, RateCalculator};
use crate::domain::entities::calculated_rate::CalculatedRate;
use crate::domain::entities::raw_rate::RawRate;
use crate::domain::errors::RateError;
use crate::domain::value_objects::quote_batch::QuoteBatch;
use crate::domain::value_objects::rate_pair::RatePair;
use crate::domain::value_objects::rate_type::RateType;
use crate::infrastructure::config::{ConfigResult, EngineConfig};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of screening an incoming rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The rate may join its batch.
    Accepted,
    /// The rate diverged from the current mean and was discarded.
    Diverged {
        /// Mean of the rates already held.
        mean: RatePair,
    },
}

impl RateDecision {
    /// Returns true if the rate was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for RateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Diverged { mean } => write!(f, "diverged from mean {mean}"),
        }
    }
}

/// Rate calculation over a shared calculator.
#[derive(Debug, Clone)]
pub struct RateCalculationService {
    calculator: Arc<dyn RateCalculator>,
}

impl RateCalculationService {
    /// Creates a service over a calculator.
    #[must_use]
    pub fn new(calculator: Arc<dyn RateCalculator>) -> Self {
        Self { calculator }
    }

    /// Creates a service over the native calculator built from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the configuration fails validation.
    pub fn from_config(config: &EngineConfig) -> ConfigResult<Self> {
        let calculator = DecimalRateCalculator::from_config(config)?;
        Ok(Self::new(Arc::new(calculator)))
    }

    /// Returns the calculator.
    #[must_use]
    pub fn calculator(&self) -> &Arc<dyn RateCalculator> {
        &self.calculator
    }

    /// Returns the base pair.
    #[must_use]
    pub fn base_rate_type(&self) -> &RateType {
        self.calculator.base_rate_type()
    }

    /// Screens `incoming` against the mean of `current`.
    ///
    /// `current` holds the latest rate of each provider for the pair. If none
    /// of them came from the incoming provider this is its first quote and it
    /// is accepted without comparison. Otherwise the incoming rate is the
    /// reference side of the divergence check.
    ///
    /// # Errors
    ///
    /// Returns an error if the calculator fails, e.g. `DivisionByZero` for a
    /// zero incoming bid or ask.
    pub fn screen_incoming(
        &self,
        incoming: &RawRate,
        current: &[RawRate],
    ) -> CalculatorResult<RateDecision> {
        if !current
            .iter()
            .any(|rate| rate.provider() == incoming.provider())
        {
            tracing::debug!(
                provider = incoming.provider(),
                rate_type = %incoming.rate_type(),
                "first rate from provider, skipping screening"
            );
            return Ok(RateDecision::Accepted);
        }

        let batch = QuoteBatch::from_raw_rates(current);
        let mean = self
            .calculator
            .calculate_mean_rate(batch.bids(), batch.asks())?;

        if self.calculator.has_material_divergence(incoming, &mean)? {
            tracing::warn!(
                provider = incoming.provider(),
                rate_type = %incoming.rate_type(),
                incoming = %incoming.pair(),
                mean = %mean,
                "discarding divergent rate"
            );
            return Ok(RateDecision::Diverged { mean });
        }

        Ok(RateDecision::Accepted)
    }

    /// USD mid-rate of the base-pair rates.
    ///
    /// # Errors
    ///
    /// - `CalculatorError::NoRates` if `base_rates` is empty
    /// - any calculator failure
    pub fn usd_mid(&self, base_rates: &[RawRate]) -> CalculatorResult<Decimal> {
        if base_rates.is_empty() {
            return Err(CalculatorError::NoRates(self.base_rate_type().clone()));
        }

        let batch = QuoteBatch::from_raw_rates(base_rates);
        let mid = self
            .calculator
            .calculate_usd_mid(batch.bids(), batch.asks())?;
        tracing::info!(
            rate_type = %self.base_rate_type(),
            samples = base_rates.len(),
            mid = %mid,
            "derived USD mid-rate"
        );
        Ok(mid)
    }

    /// Calculates the published rate for `rate_type`.
    ///
    /// The base pair is published as its mean. Any other pair is converted
    /// through `usd_mid`.
    ///
    /// # Errors
    ///
    /// - `CalculatorError::NoRates` if `rates` is empty
    /// - `RateError::InvalidInput` if a rate is not quoted for `rate_type`
    /// - `CalculatorError::MissingUsdMid` for a cross pair without `usd_mid`
    /// - any calculator failure
    pub fn calculate(
        &self,
        rate_type: &RateType,
        rates: &[RawRate],
        usd_mid: Option<Decimal>,
    ) -> CalculatorResult<CalculatedRate> {
        if rates.is_empty() {
            return Err(CalculatorError::NoRates(rate_type.clone()));
        }
        if let Some(stray) = rates.iter().find(|rate| rate.rate_type() != rate_type) {
            return Err(RateError::invalid_input(format!(
                "rate from {} is quoted for {}, not {rate_type}",
                stray.provider(),
                stray.rate_type()
            ))
            .into());
        }

        let batch = QuoteBatch::from_raw_rates(rates);
        if rate_type == self.base_rate_type() {
            return self
                .calculator
                .calculate_for_base_rate(batch.bids(), batch.asks());
        }

        let mid = usd_mid.ok_or_else(|| CalculatorError::MissingUsdMid(rate_type.clone()))?;
        self.calculator
            .calculate_for_raw_rate_type(rate_type, mid, batch.bids(), batch.asks())
    }

    /// Recalculates every pair after base-pair rates change.
    ///
    /// Returns the base calculated rate first, then one rate per non-empty
    /// cross batch in key order.
    ///
    /// # Errors
    ///
    /// - `CalculatorError::NoRates` if `base_rates` is empty
    /// - the first calculator failure
    pub fn recalculate_all(
        &self,
        base_rates: &[RawRate],
        cross_batches: &BTreeMap<RateType, Vec<RawRate>>,
    ) -> CalculatorResult<Vec<CalculatedRate>> {
        let mid = self.usd_mid(base_rates)?;
        let base_rate_type = self.base_rate_type().clone();

        let mut calculated = Vec::with_capacity(cross_batches.len().saturating_add(1));
        calculated.push(self.calculate(&base_rate_type, base_rates, Some(mid))?);

        for (rate_type, rates) in cross_batches {
            if *rate_type == base_rate_type {
                continue;
            }
            if rates.is_empty() {
                tracing::debug!(rate_type = %rate_type, "no rates held, skipping");
                continue;
            }
            calculated.push(self.calculate(rate_type, rates, Some(mid))?);
        }

        Ok(calculated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::services::contract::{CalculationScript, ContractCheckedCalculator};
    use crate::domain::value_objects::timestamp::Timestamp;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    fn service() -> RateCalculationService {
        RateCalculationService::new(Arc::new(DecimalRateCalculator::default()))
    }

    fn rate(provider: &str, code: &str, bid: f64, ask: f64) -> RawRate {
        RawRate::new(provider, RateType::new(code).unwrap(), bid, ask, Timestamp::now()).unwrap()
    }

    fn usd_try_rates() -> Vec<RawRate> {
        vec![
            rate("PF1", "USD_TRY", 34.10, 34.20),
            rate("PF2", "USD_TRY", 34.12, 34.22),
        ]
    }

    mod screening {
        use super::*;

        #[test]
        fn first_rate_is_accepted() {
            let decision = service()
                .screen_incoming(&rate("PF1", "USD_TRY", 34.10, 34.20), &[])
                .unwrap();
            assert!(decision.is_accepted());
        }

        #[test]
        fn first_rate_from_new_provider_is_not_screened() {
            let current = vec![rate("PF1", "USD_TRY", 34.10, 34.20)];
            let decision = service()
                .screen_incoming(&rate("PF2", "USD_TRY", 36.0, 36.1), &current)
                .unwrap();
            assert_eq!(decision, RateDecision::Accepted);
        }

        #[test]
        fn close_rate_is_accepted() {
            let decision = service()
                .screen_incoming(&rate("PF1", "USD_TRY", 34.15, 34.25), &usd_try_rates())
                .unwrap();
            assert_eq!(decision, RateDecision::Accepted);
        }

        #[test]
        fn divergent_rate_is_rejected_against_mean() {
            let decision = service()
                .screen_incoming(&rate("PF1", "USD_TRY", 36.0, 36.1), &usd_try_rates())
                .unwrap();
            assert_eq!(
                decision,
                RateDecision::Diverged {
                    mean: RatePair::new(dec!(34.11), dec!(34.21))
                }
            );
        }

        #[test]
        fn divergence_is_relative_to_incoming_rate() {
            let current = vec![rate("PF1", "USD_TRY", 99.005, 99.005)];
            let decision = service()
                .screen_incoming(&rate("PF1", "USD_TRY", 100.0, 100.0), &current)
                .unwrap();
            assert_eq!(decision, RateDecision::Accepted);
        }

        #[test]
        fn zero_incoming_rate_is_division_by_zero() {
            let current = vec![rate("PF1", "USD_TRY", 1.0, 1.0)];
            let err = service()
                .screen_incoming(&rate("PF1", "USD_TRY", 0.0, 0.0), &current)
                .unwrap_err();
            assert!(err.is_division_by_zero());
        }
    }

    mod calculation {
        use super::*;

        #[test]
        fn usd_mid_of_base_rates() {
            assert_eq!(service().usd_mid(&usd_try_rates()).unwrap(), dec!(34.16));
        }

        #[test]
        fn usd_mid_without_rates_is_no_rates() {
            assert_eq!(
                service().usd_mid(&[]).unwrap_err(),
                CalculatorError::NoRates(RateType::usd_try())
            );
        }

        #[test]
        fn base_pair_is_identity() {
            let rate = service()
                .calculate(&RateType::usd_try(), &usd_try_rates(), None)
                .unwrap();
            assert_eq!(rate.rate_type(), &RateType::usd_try());
            assert_eq!(rate.pair(), RatePair::new(dec!(34.11), dec!(34.21)));
        }

        #[test]
        fn cross_pair_needs_usd_mid() {
            let eur_usd = RateType::new("EUR_USD").unwrap();
            let rates = vec![rate("PF1", "EUR_USD", 1.085, 1.086)];
            assert_eq!(
                service().calculate(&eur_usd, &rates, None).unwrap_err(),
                CalculatorError::MissingUsdMid(eur_usd.clone())
            );

            let converted = service()
                .calculate(&eur_usd, &rates, Some(dec!(34.15)))
                .unwrap();
            assert_eq!(converted.rate_type().as_str(), "EUR_TRY");
            assert_eq!(converted.pair(), RatePair::new(dec!(37.05275), dec!(37.0869)));
        }

        #[test]
        fn mixed_batch_is_invalid_input() {
            let eur_usd = RateType::new("EUR_USD").unwrap();
            let rates = vec![
                rate("PF1", "EUR_USD", 1.085, 1.086),
                rate("PF2", "GBP_USD", 1.25, 1.26),
            ];
            assert!(matches!(
                service().calculate(&eur_usd, &rates, Some(dec!(34.15))),
                Err(CalculatorError::Rate(RateError::InvalidInput(_)))
            ));
        }

        #[test]
        fn empty_batch_is_no_rates() {
            let gbp_usd = RateType::new("GBP_USD").unwrap();
            assert!(matches!(
                service().calculate(&gbp_usd, &[], Some(dec!(34))),
                Err(CalculatorError::NoRates(_))
            ));
        }
    }

    mod recalculation {
        use super::*;

        #[test]
        fn base_first_then_cross_pairs_in_order() {
            let mut cross = BTreeMap::new();
            cross.insert(
                RateType::new("GBP_USD").unwrap(),
                vec![rate("PF1", "GBP_USD", 1.25, 1.26)],
            );
            cross.insert(
                RateType::new("EUR_USD").unwrap(),
                vec![rate("PF1", "EUR_USD", 1.08, 1.09)],
            );
            cross.insert(RateType::new("CHF_USD").unwrap(), Vec::new());

            let rates = service().recalculate_all(&usd_try_rates(), &cross).unwrap();
            let codes: Vec<&str> = rates.iter().map(|r| r.rate_type().as_str()).collect();
            assert_eq!(codes, vec!["USD_TRY", "EUR_TRY", "GBP_TRY"]);
        }

        #[test]
        fn without_base_rates_nothing_is_published() {
            let cross = BTreeMap::new();
            assert!(matches!(
                service().recalculate_all(&[], &cross),
                Err(CalculatorError::NoRates(_))
            ));
        }
    }

    #[derive(Debug)]
    struct ObjectMeanScript;

    impl CalculationScript for ObjectMeanScript {
        fn name(&self) -> &str {
            "object-mean"
        }

        fn calculate_mean_rate(&self, _bids: &[Decimal], _asks: &[Decimal]) -> CalculatorResult<Value> {
            Ok(json!({"bid": 34.1, "ask": 34.2}))
        }
    }

    #[test]
    fn malformed_script_output_is_never_replaced() {
        let service = RateCalculationService::new(Arc::new(ContractCheckedCalculator::new(
            ObjectMeanScript,
            RateType::usd_try(),
        )));
        let err = service
            .screen_incoming(&rate("PF1", "USD_TRY", 34.1, 34.2), &usd_try_rates())
            .unwrap_err();
        assert!(err.is_contract_violation());
    }
}
