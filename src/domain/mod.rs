//! # Domain Layer
//!
//! Exact-decimal rate arithmetic with no infrastructure dependencies.
//!
//! - [`value_objects`]: rate pairs, policies, precision and exact conversion
//! - [`entities`]: raw, mean and calculated rates
//! - [`services`]: decimal engine, aggregator and divergence detector
//! - [`errors`]: [`RateError`](errors::RateError)

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{RateError, RateResult};
