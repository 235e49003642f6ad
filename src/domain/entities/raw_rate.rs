//! # Raw Rate Entity
//!
//! A single bid/ask quote for a currency pair from one liquidity provider.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::domain::entities::raw_rate::RawRate;
//! use fx_rate_engine::domain::value_objects::{RateType, Timestamp};
//!
//! let rate = RawRate::new(
//!     "PF1",
//!     RateType::new("USD_TRY").unwrap(),
//!     34.10,
//!     34.25,
//!     Timestamp::now(),
//! )
//! .unwrap();
//!
//! assert_eq!(rate.bid().to_string(), "34.1");
//! ```

use crate::domain::errors::{RateError, RateResult};
use crate::domain::value_objects::exact::ExactDecimal;
use crate::domain::value_objects::rate_pair::RatePair;
use crate::domain::value_objects::rate_type::RateType;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quote received from a liquidity provider.
///
/// # Invariants
///
/// - `provider` is non-empty
/// - `bid` and `ask` are exact decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRate {
    provider: String,
    rate_type: RateType,
    bid: Decimal,
    ask: Decimal,
    timestamp: Timestamp,
}

impl RawRate {
    /// Creates a raw rate, converting bid and ask exactly.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` if the provider is empty or either
    /// price cannot be represented exactly (e.g. NaN).
    pub fn new(
        provider: impl Into<String>,
        rate_type: RateType,
        bid: impl ExactDecimal,
        ask: impl ExactDecimal,
        timestamp: Timestamp,
    ) -> RateResult<Self> {
        let provider = provider.into();
        if provider.trim().is_empty() {
            return Err(RateError::invalid_input("raw rate provider must not be empty"));
        }
        Ok(Self {
            provider,
            rate_type,
            bid: bid.to_exact_decimal()?,
            ask: ask.to_exact_decimal()?,
            timestamp,
        })
    }

    /// Returns the provider that quoted this rate.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the currency pair.
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

    /// Returns the bid and ask as a pair.
    #[must_use]
    pub fn pair(&self) -> RatePair {
        RatePair::new(self.bid, self.ask)
    }

    /// Returns when the rate was quoted.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl fmt::Display for RawRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RawRate({} from {} bid={} ask={} at {})",
            self.rate_type, self.provider, self.bid, self.ask, self.timestamp
        )
    }
}
