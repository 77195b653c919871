//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to its defaults. Secrets such as `OPENAI_API_KEY` are read from
//! the environment by the components that need them.
//!
//! # Example
//!
//! ```no_run
//! use hedgerow::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("hedgerow.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocation::AllocationConfig;
use super::embedding::EmbeddingConfig;
use super::logging::LoggingConfig;
use super::matching::MatchingConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(skip_serializing)]
    pub logging: LoggingConfig,

    /// Keyword pruning and semantic matching.
    pub matching: MatchingConfig,

    /// Title embedding provider.
    pub embedding: EmbeddingConfig,

    /// Stake, fee model and discrete venue for hedge sizing.
    pub allocation: AllocationConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first field out of
    /// range.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let matching = &self.matching;
        if matching.rarity_ceiling == 0 {
            return Err(invalid("rarity_ceiling", "must be greater than 0"));
        }
        if !(-1.0..=1.0).contains(&matching.similarity_threshold) {
            return Err(invalid("similarity_threshold", "must be between -1 and 1"));
        }
        if matching.warmup_concurrency == 0 {
            return Err(invalid("warmup_concurrency", "must be greater than 0"));
        }
        if matching.warmup_batch_size == 0 {
            return Err(invalid("warmup_batch_size", "must be greater than 0"));
        }

        if self.embedding.dimension == 0 {
            return Err(invalid("dimension", "must be greater than 0"));
        }

        let allocation = &self.allocation;
        if allocation.stake <= Decimal::ZERO {
            return Err(invalid("stake", "must be greater than 0"));
        }
        if allocation.fee_rate < Decimal::ZERO || allocation.fee_rate >= Decimal::ONE {
            return Err(invalid("fee_rate", "must be at least 0 and below 1"));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            _ => Err(invalid("format", "must be \"pretty\" or \"json\"")),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
