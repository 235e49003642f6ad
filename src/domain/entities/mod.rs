//! # Domain Entities
//!
//! - [`RawRate`]: a quote from one liquidity provider
//! - [`MeanRate`]: a batch mean with its sample counts
//! - [`CalculatedRate`]: the published rate for a target pair

pub mod calculated_rate;
pub mod mean_rate;
pub mod raw_rate;

pub use calculated_rate::CalculatedRate;
pub use mean_rate::MeanRate;
pub use raw_rate::RawRate;
