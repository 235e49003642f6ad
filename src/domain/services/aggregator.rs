//! # Rate Aggregator
//!
//! Composes the decimal engine into rate-level calculations:
//!
//! - [`Aggregator::mean_rate`]: mean bid and mean ask of a batch
//! - [`Aggregator::usd_mid`]: `(mean(bids) + mean(asks)) / divisor`
//! - [`Aggregator::apply_mid_rate`]: cross-rate through a USD mid-rate
//! - [`Aggregator::identity_rate`]: mean rate of the base pair itself
//!
//! Empty inputs average to zero on each side independently.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::services::aggregator::Aggregator;
//! use fx_rate_engine::domain::value_objects::policy::MidDivisor;
//! use rust_decimal::Decimal;
//!
//! let aggregator = Aggregator::default();
//! let mid = aggregator
//!     .usd_mid(&[8.0, 2.0], &[6.0, 2.0], MidDivisor::TWO)
//!     .unwrap();
//! assert_eq!(mid, Decimal::new(45, 1));
//! ```

use crate::domain::entities::mean_rate::MeanRate;
use crate::domain::errors::RateResult;
use crate::domain::services::decimal_engine::DecimalEngine;
use crate::domain::value_objects::exact::ExactDecimal;
use crate::domain::value_objects::policy::MidDivisor;
use crate::domain::value_objects::quote_batch::QuoteBatch;
use crate::domain::value_objects::rate_pair::RatePair;
use rust_decimal::Decimal;

/// Rate-level aggregation over a [`DecimalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregator {
    engine: DecimalEngine,
}

impl Aggregator {
    /// Creates an aggregator over an engine.
    #[must_use]
    pub const fn new(engine: DecimalEngine) -> Self {
        Self { engine }
    }

    /// Creates an aggregator bound to the process-wide precision context.
    #[must_use]
    pub fn global() -> Self {
        Self::new(DecimalEngine::global())
    }

    /// Returns the underlying engine.
    #[inline]
    #[must_use]
    pub const fn engine(&self) -> &DecimalEngine {
        &self.engine
    }

    /// Mean bid and mean ask. An empty side averages to zero.
    ///
    /// # Errors
    ///
    /// - `RateError::InvalidInput` if a quote is not exactly representable
    /// - `RateError::Overflow` if a sum leaves the decimal range
    pub fn mean_rate<B: ExactDecimal, A: ExactDecimal>(
        &self,
        bids: &[B],
        asks: &[A],
    ) -> RateResult<RatePair> {
        Ok(RatePair::new(self.engine.mean(bids)?, self.engine.mean(asks)?))
    }

    /// Mean rate of a batch along with its sample counts.
    ///
    /// # Errors
    ///
    /// See [`Aggregator::mean_rate`].
    pub fn summarize(&self, batch: &QuoteBatch) -> RateResult<MeanRate> {
        let pair = self.mean_rate(batch.bids(), batch.asks())?;
        Ok(MeanRate::new(pair, batch.bids().len(), batch.asks().len()))
    }

    /// Mid-rate `(mean(bids) + mean(asks)) / divisor`.
    ///
    /// Both-empty inputs produce zero.
    ///
    /// # Errors
    ///
    /// - `RateError::InvalidInput` if a quote is not exactly representable
    /// - `RateError::Overflow` if a sum leaves the decimal range
    pub fn usd_mid<B: ExactDecimal, A: ExactDecimal>(
        &self,
        bids: &[B],
        asks: &[A],
        divisor: MidDivisor,
    ) -> RateResult<Decimal> {
        let mean = self.mean_rate(bids, asks)?;
        let sum = self.engine.add(mean.bid(), mean.ask())?;
        self.engine.divide(sum, divisor.value())
    }

    /// Like [`Aggregator::usd_mid`], taking an unvalidated divisor.
    ///
    /// # Errors
    ///
    /// Returns `RateError::ContractViolation` if `divisor` is zero, otherwise
    /// see [`Aggregator::usd_mid`].
    pub fn usd_mid_with<B: ExactDecimal, A: ExactDecimal>(
        &self,
        bids: &[B],
        asks: &[A],
        divisor: Decimal,
    ) -> RateResult<Decimal> {
        self.usd_mid(bids, asks, MidDivisor::new(divisor)?)
    }

    /// Cross-rate `(mean(bids) * mid, mean(asks) * mid)`.
    ///
    /// # Errors
    ///
    /// - `RateError::InvalidInput` if a quote or `mid` is not exactly representable
    /// - `RateError::Overflow` if a product leaves the decimal range
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_rate_engine::domain::services::aggregator::Aggregator;
    /// use fx_rate_engine::domain::value_objects::RatePair;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Aggregator::default()
    ///     .apply_mid_rate(Decimal::TWO, &[1.0, 3.0], &[2.0, 4.0])
    ///     .unwrap();
    /// assert_eq!(rate, RatePair::new(Decimal::from(4), Decimal::from(6)));
    /// ```
    pub fn apply_mid_rate<M: ExactDecimal, B: ExactDecimal, A: ExactDecimal>(
        &self,
        mid: M,
        bids: &[B],
        asks: &[A],
    ) -> RateResult<RatePair> {
        let mid = mid.to_exact_decimal()?;
        let mean = self.mean_rate(bids, asks)?;
        Ok(RatePair::new(
            self.engine.multiply(mean.bid(), mid)?,
            self.engine.multiply(mean.ask(), mid)?,
        ))
    }

    /// Mean rate of the base pair. Behaviourally identical to
    /// [`Aggregator::mean_rate`].
    ///
    /// # Errors
    ///
    /// See [`Aggregator::mean_rate`].
    pub fn identity_rate<B: ExactDecimal, A: ExactDecimal>(
        &self,
        bids: &[B],
        asks: &[A],
    ) -> RateResult<RatePair> {
        self.mean_rate(bids, asks)
    }
}
