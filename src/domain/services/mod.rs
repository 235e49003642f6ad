//! # Domain Services
//!
//! Stateless calculations over exact decimals.
//!
//! ## Services
//!
//! - [`DecimalEngine`]: mean, percentage difference and division
//! - [`Aggregator`]: mean rate, USD mid-rate and cross-rate conversion
//! - [`DivergenceDetector`]: threshold-based divergence check

pub mod aggregator;
pub mod decimal_engine;
pub mod divergence;

pub use aggregator::Aggregator;
pub use decimal_engine::DecimalEngine;
pub use divergence::{DivergenceDetector, DivergenceReport};
