//! # Quote Batch
//!
//! The bids and asks of one calculation, held as exact decimals.

use crate::domain::entities::raw_rate::RawRate;
use crate::domain::errors::RateResult;
use crate::domain::value_objects::exact::{ExactDecimal, to_exact_decimals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered bid and ask quotes from one or more sources.
///
/// An empty batch is valid; its means are zero.
///
/// # Examples
///
/// ```
/// use fx_rate_engine::domain::value_objects::quote_batch::QuoteBatch;
///
/// let batch = QuoteBatch::from_values(&[1.1005, 1.1007], &[1.1009, 1.1011]).unwrap();
/// assert_eq!(batch.bids().len(), 2);
/// assert!(!batch.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteBatch {
    bids: Vec<Decimal>,
    asks: Vec<Decimal>,
}

impl QuoteBatch {
    /// Creates a batch from decimal bids and asks.
    #[must_use]
    pub fn new(bids: Vec<Decimal>, asks: Vec<Decimal>) -> Self {
        Self { bids, asks }
    }

    /// Creates a batch, converting every value exactly.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` on the first value that cannot be
    /// represented exactly.
    pub fn from_values<B: ExactDecimal, A: ExactDecimal>(bids: &[B], asks: &[A]) -> RateResult<Self> {
        Ok(Self::new(to_exact_decimals(bids)?, to_exact_decimals(asks)?))
    }

    /// Splits raw rates into their bids and asks, preserving order.
    #[must_use]
    pub fn from_raw_rates(rates: &[RawRate]) -> Self {
        let (bids, asks) = rates.iter().map(|rate| (rate.bid(), rate.ask())).unzip();
        Self { bids, asks }
    }

    /// Returns the bids.
    #[inline]
    #[must_use]
    pub fn bids(&self) -> &[Decimal] {
        &self.bids
    }

    /// Returns the asks.
    #[inline]
    #[must_use]
    pub fn asks(&self) -> &[Decimal] {
        &self.asks
    }

    /// Returns true if there are neither bids nor asks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
