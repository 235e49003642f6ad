//! # Rate Snapshot
//!
//! An old/new pair of rates compared for divergence.

use crate::domain::value_objects::rate_pair::RatePair;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two rate pairs captured for a single divergence comparison.
///
/// The `old` side is the reference every percentage is normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateSnapshot {
    old: RatePair,
    new: RatePair,
}

impl RateSnapshot {
    /// Creates a snapshot from the reference (`old`) and candidate (`new`) pairs.
    #[must_use]
    pub const fn new(old: RatePair, new: RatePair) -> Self {
        Self { old, new }
    }

    /// Returns the reference pair.
    #[inline]
    #[must_use]
    pub const fn old(&self) -> RatePair {
        self.old
    }

    /// Returns the candidate pair.
    #[inline]
    #[must_use]
    pub const fn new_pair(&self) -> RatePair {
        self.new
    }

    /// Returns the snapshot with old and new exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self::new(self.new, self.old)
    }
}

impl fmt::Display for RateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn swapped_exchanges_sides() {
        let old = RatePair::new(dec!(1.10), dec!(1.12));
        let new = RatePair::new(dec!(1.111), dec!(1.1312));
        let snapshot = RateSnapshot::new(old, new).swapped();
        assert_eq!(snapshot.old(), new);
        assert_eq!(snapshot.new_pair(), old);
    }

    #[test]
    fn display_shows_direction() {
        let snapshot = RateSnapshot::new(
            RatePair::new(dec!(1), dec!(2)),
            RatePair::new(dec!(3), dec!(4)),
        );
        assert_eq!(snapshot.to_string(), "[1, 2] -> [3, 4]");
    }
}
