//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Rates
//!
//! - [`RatePair`]: a bid/ask pair of exact decimals
//! - [`RateSnapshot`]: old and new pairs compared for divergence
//! - [`RateType`]: currency pair code such as `USD_TRY`
//! - [`QuoteBatch`]: ordered bids and asks of one calculation
//!
//! ## Policies
//!
//! - [`DivergenceThreshold`]: inclusive percentage threshold
//! - [`MidDivisor`]: non-zero mid-rate divisor
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: error type for arithmetic failures
//! - [`CheckedDecimal`]: non-panicking decimal operators
//! - [`PrecisionContext`]: significant-digit rounding context
//! - [`ExactDecimal`]: lossless conversion into `Decimal`

pub mod arithmetic;
pub mod exact;
pub mod policy;
pub mod precision;
pub mod quote_batch;
pub mod rate_pair;
pub mod rate_snapshot;
pub mod rate_type;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedDecimal, Operation};
pub use exact::{ExactDecimal, parse_exact, to_exact_decimals};
pub use policy::{DivergenceThreshold, MidDivisor};
pub use precision::{DEFAULT_SIGNIFICANT_DIGITS, MAX_SIGNIFICANT_DIGITS, PrecisionContext};
pub use quote_batch::QuoteBatch;
pub use rate_pair::RatePair;
pub use rate_snapshot::RateSnapshot;
pub use rate_type::RateType;
pub use timestamp::Timestamp;
