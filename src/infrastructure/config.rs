//! # Engine Configuration
//!
//! Layered configuration for the rate engine:
//!
//! 1. `config/default.toml` (optional)
//! 2. `config/{RUN_MODE}.toml` (optional, `RUN_MODE` defaults to `development`)
//! 3. environment variables prefixed with `RATE_ENGINE_`, nested keys
//!    separated by `__` (e.g. `RATE_ENGINE_LOGGING__FORMAT=json`)
//!
//! A `.env` file in the working directory is loaded first.
//!
//! # Examples
//!
//! ```
//! use fx_rate_engine::infrastructure::config::EngineConfig;
//! use rust_decimal::Decimal;
//!
//! let config = EngineConfig::from_toml_str(r#"mid_divisor = "2""#).unwrap();
//! assert_eq!(config.precision, 20);
//! assert_eq!(config.divisor().unwrap().value(), Decimal::TWO);
//! ```

use crate::domain::errors::RateError;
use crate::domain::value_objects::policy::{DivergenceThreshold, MidDivisor};
use crate::domain::value_objects::precision::{DEFAULT_SIGNIFICANT_DIGITS, PrecisionContext};
use crate::domain::value_objects::rate_type::{RateType, USD_TRY};
use crate::infrastructure::logging::LogSettings;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RATE_ENGINE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value failed validation.
    #[error("invalid configuration value for {field}: {source}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Validation failure.
        source: RateError,
    },

    /// The precision context could not be installed.
    #[error("precision context already installed with different settings: {0}")]
    PrecisionConflict(String),
}

impl ConfigError {
    fn invalid(field: &'static str) -> impl FnOnce(RateError) -> Self {
        move |source| Self::Invalid { field, source }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Rate engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Significant digits for every decimal result.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Divergence threshold in percent.
    #[serde(default = "default_threshold")]
    pub divergence_threshold: Decimal,
    /// Mid-rate divisor. Required.
    pub mid_divisor: Decimal,
    /// Pair quoted directly against the target currency.
    #[serde(default = "default_base_rate_type")]
    pub base_rate_type: String,
    /// Logging settings.
    #[serde(default)]
    pub logging: LogSettings,
}

fn default_precision() -> u32 {
    DEFAULT_SIGNIFICANT_DIGITS
}

fn default_threshold() -> Decimal {
    DivergenceThreshold::default().value()
}

fn default_base_rate_type() -> String {
    USD_TRY.to_owned()
}

impl EngineConfig {
    /// Loads configuration from `.env`, config files and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source cannot be read or a required
    /// value is missing.
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the document is malformed or a required
    /// value is missing.
    pub fn from_toml_str(toml: &str) -> ConfigResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Checks every value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first invalid field.
    pub fn validate(&self) -> ConfigResult<()> {
        self.precision_context()?;
        self.threshold()?;
        self.divisor()?;
        self.base_pair()?;
        Ok(())
    }

    /// Returns the precision context.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if precision is outside `1..=28`.
    pub fn precision_context(&self) -> ConfigResult<PrecisionContext> {
        PrecisionContext::new(self.precision)
            .map_err(RateError::from)
            .map_err(ConfigError::invalid("precision"))
    }

    /// Returns the divergence threshold.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the threshold is negative.
    pub fn threshold(&self) -> ConfigResult<DivergenceThreshold> {
        DivergenceThreshold::new(self.divergence_threshold)
            .map_err(ConfigError::invalid("divergence_threshold"))
    }

    /// Returns the mid-rate divisor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` wrapping a contract violation if the
    /// divisor is zero.
    pub fn divisor(&self) -> ConfigResult<MidDivisor> {
        MidDivisor::new(self.mid_divisor).map_err(ConfigError::invalid("mid_divisor"))
    }

    /// Returns the base pair.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the code is not a `BASE_QUOTE` pair.
    pub fn base_pair(&self) -> ConfigResult<RateType> {
        RateType::new(&self.base_rate_type).map_err(ConfigError::invalid("base_rate_type"))
    }

    /// Installs the configured precision as the process-wide context.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Invalid` if precision is out of range
    /// - `ConfigError::PrecisionConflict` if a different context is already installed
    pub fn install_precision(&self) -> ConfigResult<PrecisionContext> {
        let context = self.precision_context()?;
        context
            .install()
            .map_err(|err| ConfigError::PrecisionConflict(err.to_string()))?;
        tracing::info!(precision = %context, "installed precision context");
        Ok(context)
    }
}
