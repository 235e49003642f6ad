//! # fx-rate-engine
//!
//! Fixed-precision currency-rate aggregation and divergence detection.
//!
//! Bid/ask quotes from several liquidity providers are averaged with exact
//! decimal arithmetic, combined into a USD mid-rate, converted into cross
//! rates, and screened for material divergence before they are accepted.
//!
//! ## Architecture
//!
//! - [`domain`]: decimal engine, aggregator, divergence detector and the
//!   value objects they work on
//! - [`application`]: the [`RateCalculator`](application::services::RateCalculator)
//!   interface, contract checks for pluggable scripts, and the rate
//!   calculation service
//! - [`infrastructure`]: layered configuration and logging
//!
//! ## Example
//!
//! ```
//! use fx_rate_engine::domain::services::{Aggregator, DivergenceDetector};
//! use fx_rate_engine::domain::value_objects::{MidDivisor, RatePair};
//! use rust_decimal::Decimal;
//!
//! let aggregator = Aggregator::default();
//! let mean = aggregator.mean_rate(&[1.1005, 1.1007], &[1.1009, 1.1011]).unwrap();
//! assert_eq!(mean, RatePair::new(Decimal::new(11006, 4), Decimal::new(11010, 4)));
//!
//! let mid = aggregator.usd_mid(&[34.10], &[34.20], MidDivisor::TWO).unwrap();
//! assert_eq!(mid, Decimal::new(3415, 2));
//!
//! let detector = DivergenceDetector::default();
//! let incoming = RatePair::new(Decimal::new(3600, 2), Decimal::new(3610, 2));
//! let held_mean = RatePair::new(Decimal::new(3410, 2), Decimal::new(3420, 2));
//! assert!(detector.has_material_divergence(&incoming, &held_mean).unwrap());
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
