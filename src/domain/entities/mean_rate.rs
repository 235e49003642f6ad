//! # Mean Rate
//!
//! A mean bid/ask pair together with the number of quotes behind each side.
//!
//! Means of empty batches are zero by policy. Carrying the sample counts lets
//! a caller tell "no data" apart from a computed mean that happens to be zero.

use crate::domain::value_objects::rate_pair::RatePair;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean of a quote batch with its sample counts.
///
/// # Examples
///
/// ```
/// use fx_rate_engine::domain::entities::mean_rate::MeanRate;
/// use fx_rate_engine::domain::value_objects::RatePair;
///
/// let empty = MeanRate::new(RatePair::zero(), 0, 0);
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeanRate {
    pair: RatePair,
    bid_samples: usize,
    ask_samples: usize,
}

impl MeanRate {
    /// Creates a mean rate.
    #[must_use]
    pub const fn new(pair: RatePair, bid_samples: usize, ask_samples: usize) -> Self {
        Self {
            pair,
            bid_samples,
            ask_samples,
        }
    }

    /// Returns the mean pair.
    #[inline]
    #[must_use]
    pub const fn pair(&self) -> RatePair {
        self.pair
    }

    /// Returns how many bids were averaged.
    #[inline]
    #[must_use]
    pub const fn bid_samples(&self) -> usize {
        self.bid_samples
    }

    /// Returns how many asks were averaged.
    #[inline]
    #[must_use]
    pub const fn ask_samples(&self) -> usize {
        self.ask_samples
    }

    /// Returns true if neither side had any quotes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bid_samples == 0 && self.ask_samples == 0
    }

    /// Returns true if both sides were computed from at least one quote.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.bid_samples > 0 && self.ask_samples > 0
    }
}

impl From<MeanRate> for RatePair {
    fn from(mean: MeanRate) -> Self {
        mean.pair
    }
}

impl fmt::Display for MeanRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MeanRate({} from {} bids, {} asks)",
            self.pair, self.bid_samples, self.ask_samples
        )
    }
}
