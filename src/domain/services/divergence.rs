//! # Divergence Detector
//!
//! Decides whether a new rate has moved materially away from an old one.
//!
//! The bid and ask percentage differences are each normalized against the
//! **old** side, averaged, and compared to a threshold. The comparison is
//! inclusive: an average exactly equal to the threshold is a divergence.
//! Because the old side is the reference, swapping old and new can change the
//! verdict.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::services::divergence::has_material_divergence;
//! use fx_rate_engine::domain::value_objects::policy::DivergenceThreshold;
//!
//! let diverged = has_material_divergence(
//!     1.10, 1.12,
//!     1.111, 1.1312,
//!     DivergenceThreshold::default(),
//! )
//! .unwrap();
//! assert!(diverged);
//! ```

use crate::domain::errors::RateResult;
use crate::domain::services::decimal_engine::DecimalEngine;
use crate::domain::value_objects::exact::ExactDecimal;
use crate::domain::value_objects::policy::DivergenceThreshold;
use crate::domain::value_objects::rate_pair::RatePair;
use crate::domain::value_objects::rate_snapshot::RateSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentages behind a divergence verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceReport {
    /// Bid difference in percent of the old bid.
    pub bid_percent: Decimal,
    /// Ask difference in percent of the old ask.
    pub ask_percent: Decimal,
    /// Mean of the two percentages.
    pub average_percent: Decimal,
    /// Threshold the average was compared against.
    pub threshold: DivergenceThreshold,
    /// True if the average met or exceeded the threshold.
    pub diverged: bool,
}

impl fmt::Display for DivergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bid {}% ask {}% avg {}% (threshold {}): {}",
            self.bid_percent,
            self.ask_percent,
            self.average_percent,
            self.threshold,
            if self.diverged { "diverged" } else { "within" }
        )
    }
}

/// Threshold-based divergence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DivergenceDetector {
    engine: DecimalEngine,
    threshold: DivergenceThreshold,
}

impl DivergenceDetector {
    /// Creates a detector.
    #[must_use]
    pub const fn new(engine: DecimalEngine, threshold: DivergenceThreshold) -> Self {
        Self { engine, threshold }
    }

    /// Creates a detector with the given threshold and the process-wide
    /// precision context.
    #[must_use]
    pub fn with_threshold(threshold: DivergenceThreshold) -> Self {
        Self::new(DecimalEngine::global(), threshold)
    }

    /// Returns the threshold.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> DivergenceThreshold {
        self.threshold
    }

    /// Computes the full divergence report for a snapshot.
    ///
    /// # Errors
    ///
    /// - `RateError::DivisionByZero` if the old bid or old ask is zero
    /// - `RateError::Overflow` if an intermediate result leaves the decimal range
    pub fn assess(&self, snapshot: &RateSnapshot) -> RateResult<DivergenceReport> {
        let old = snapshot.old();
        let new = snapshot.new_pair();

        let bid_percent = self
            .engine
            .percentage_difference(old.bid(), new.bid(), old.bid())?;
        let ask_percent = self
            .engine
            .percentage_difference(old.ask(), new.ask(), old.ask())?;
        let average_percent = self.engine.mean(&[bid_percent, ask_percent])?;

        Ok(DivergenceReport {
            bid_percent,
            ask_percent,
            average_percent,
            threshold: self.threshold,
            diverged: self.threshold.is_met_by(average_percent),
        })
    }

    /// Returns true if `new` diverges materially from `old`.
    ///
    /// # Errors
    ///
    /// See [`DivergenceDetector::assess`].
    pub fn has_material_divergence(&self, old: &RatePair, new: &RatePair) -> RateResult<bool> {
        Ok(self.assess(&RateSnapshot::new(*old, *new))?.diverged)
    }
}

/// Divergence check on loose bid/ask values under the process-wide precision
/// context.
///
/// # Errors
///
/// - `RateError::InvalidInput` if a value is not exactly representable
/// - `RateError::DivisionByZero` if `old_bid` or `old_ask` is zero
pub fn has_material_divergence<W, X, Y, Z>(
    old_bid: W,
    old_ask: X,
    new_bid: Y,
    new_ask: Z,
    threshold: DivergenceThreshold,
) -> RateResult<bool>
where
    W: ExactDecimal,
    X: ExactDecimal,
    Y: ExactDecimal,
    Z: ExactDecimal,
{
    let old = RatePair::new(old_bid.to_exact_decimal()?, old_ask.to_exact_decimal()?);
    let new = RatePair::new(new_bid.to_exact_decimal()?, new_ask.to_exact_decimal()?);
    DivergenceDetector::with_threshold(threshold).has_material_divergence(&old, &new)
}
