//! # Infrastructure Layer
//!
//! Configuration loading and logging setup.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use logging::{LogFormat, LogSettings, LoggingError, init_logging};
