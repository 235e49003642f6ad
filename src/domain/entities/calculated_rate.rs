//! # Calculated Rate Entity
//!
//! The rate published for a target currency pair after aggregation and,
//! for cross pairs, conversion through the USD mid-rate.

use crate::domain::value_objects::rate_pair::RatePair;
use crate::domain::value_objects::rate_type::RateType;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calculated bid/ask for a target pair.
///
/// # Examples
///
/// ```
/// use fx_rate_engine::domain::entities::calculated_rate::CalculatedRate;
/// use fx_rate_engine::domain::value_objects::{RatePair, RateType, Timestamp};
/// use rust_decimal::Decimal;
///
/// let rate = CalculatedRate::new(
///     RateType::new("EUR_TRY").unwrap(),
///     RatePair::new(Decimal::new(3700, 2), Decimal::new(3720, 2)),
///     Timestamp::now(),
/// );
/// assert_eq!(rate.rate_type().as_str(), "EUR_TRY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedRate {
    rate_type: RateType,
    bid: Decimal,
    ask: Decimal,
    timestamp: Timestamp,
}

impl CalculatedRate {
    /// Creates a calculated rate.
    #[must_use]
    pub fn new(rate_type: RateType, pair: RatePair, timestamp: Timestamp) -> Self {
        Self {
            rate_type,
            bid: pair.bid(),
            ask: pair.ask(),
            timestamp,
        }
    }

    /// Returns the calculated pair code.
    #[inline]
    #[must_use]
    pub fn rate_type(&self) -> &RateType {
        &self.rate_type
    }

    /// Returns the bid.
    #[inline]
    #[must_use]
    pub fn bid(&self) -> Decimal {
        self.bid
    }

    /// Returns the ask.
    #[inline]
    #[must_use]
    pub fn ask(&self) -> Decimal {
        self.ask
    }

    /// Returns bid and ask as a pair.
    #[must_use]
    pub fn pair(&self) -> RatePair {
        RatePair::new(self.bid, self.ask)
    }

    /// Returns when the rate was calculated.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl fmt::Display for CalculatedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalculatedRate({} bid={} ask={} at {})",
            self.rate_type, self.bid, self.ask, self.timestamp
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pair_matches_sides() {
        let pair = RatePair::new(dec!(34.1), dec!(34.3));
        let rate = CalculatedRate::new(RateType::new("USD_TRY").unwrap(), pair, Timestamp::now());
        assert_eq!(rate.pair(), pair);
        assert_eq!(rate.bid(), dec!(34.1));
        assert_eq!(rate.ask(), dec!(34.3));
    }

    #[test]
    fn serializes_with_named_fields() {
        let rate = CalculatedRate::new(
            RateType::new("GBP_TRY").unwrap(),
            RatePair::new(dec!(43.5), dec!(43.9)),
            Timestamp::from_secs(1_704_067_200).unwrap(),
        );
        let json = serde_json::to_value(&rate).unwrap();
        assert_eq!(json["rate_type"], "GBP_TRY");
        assert_eq!(json["bid"], "43.5");
        assert_eq!(json["ask"], "43.9");
    }
}
