//! # Rate Pair
//!
//! A `(bid, ask)` pair of exact decimals.
//!
//! A [`RatePair`] always serializes as an ordered two-element sequence
//! `[bid, ask]`, never as a mapping, so downstream consumers can rely on its
//! shape.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::value_objects::rate_pair::RatePair;
//! use rust_decimal::Decimal;
//!
//! let pair = RatePair::new(Decimal::new(11006, 4), Decimal::new(11008, 4));
//! assert_eq!(serde_json::to_string(&pair).unwrap(), r#"["1.1006","1.1008"]"#);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered `(bid, ask)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RatePair {
    bid: Decimal,
    ask: Decimal,
}

impl RatePair {
    /// Creates a new rate pair.
    #[must_use]
    pub const fn new(bid: Decimal, ask: Decimal) -> Self {
        Self { bid, ask }
    }

    /// Returns a pair with both sides zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Returns the bid side.
    #[inline]
    #[must_use]
    pub const fn bid(&self) -> Decimal {
        self.bid
    }

    /// Returns the ask side.
    #[inline]
    #[must_use]
    pub const fn ask(&self) -> Decimal {
        self.ask
    }

    /// Returns true if both sides are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bid.is_zero() && self.ask.is_zero()
    }

    /// Returns the pair as an array `[bid, ask]`.
    #[must_use]
    pub const fn to_array(self) -> [Decimal; 2] {
        [self.bid, self.ask]
    }
}

impl From<(Decimal, Decimal)> for RatePair {
    fn from((bid, ask): (Decimal, Decimal)) -> Self {
        Self::new(bid, ask)
    }
}

impl From<RatePair> for (Decimal, Decimal) {
    fn from(pair: RatePair) -> Self {
        (pair.bid, pair.ask)
    }
}

impl Serialize for RatePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.bid, self.ask).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RatePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (bid, ask) = <(Decimal, Decimal)>::deserialize(deserializer)?;
        Ok(Self::new(bid, ask))
    }
}

impl fmt::Display for RatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.bid, self.ask)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accessors_return_sides() {
        let pair = RatePair::new(dec!(34.1), dec!(34.2));
        assert_eq!(pair.bid(), dec!(34.1));
        assert_eq!(pair.ask(), dec!(34.2));
        assert_eq!(pair.to_array(), [dec!(34.1), dec!(34.2)]);
    }

    #[test]
    fn zero_pair() {
        assert!(RatePair::zero().is_zero());
        assert!(!RatePair::new(dec!(0), dec!(1)).is_zero());
    }

    #[test]
    fn serializes_as_two_element_array() {
        let json = serde_json::to_value(RatePair::new(dec!(5), dec!(4))).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn deserializes_from_array() {
        let pair: RatePair = serde_json::from_str(r#"["0.15","0.35"]"#).unwrap();
        assert_eq!(pair, RatePair::new(dec!(0.15), dec!(0.35)));
    }

    #[test]
    fn rejects_mapping_on_deserialize() {
        let result: Result<RatePair, _> = serde_json::from_str(r#"{"bid":"1","ask":"2"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn display_shows_both_sides() {
        assert_eq!(RatePair::new(dec!(1.1), dec!(1.2)).to_string(), "[1.1, 1.2]");
    }
}
