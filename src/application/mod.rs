//! # Application Layer
//!
//! Rate calculators and the service that drives them.

pub mod error;
pub mod services;

pub use error::{CalculatorError, CalculatorResult};
