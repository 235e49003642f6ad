//! # Application Services
//!
//! Services that orchestrate domain logic:
//! - [`RateCalculator`]: the calculation strategy interface
//! - [`ContractCheckedCalculator`]: validates untyped script results
//! - [`RateCalculationService`]: screening, USD mid-rate and conversion flow

pub mod calculator;
pub mod contract;
pub mod rate_service;

pub use calculator::{DECIMAL_STRATEGY, DecimalRateCalculator, RateCalculator};
pub use contract::{
    CalculationScript, ContractCheckedCalculator, expect_bool, expect_decimal, expect_rate_pair,
};
pub use rate_service::{RateCalculationService, RateDecision};
