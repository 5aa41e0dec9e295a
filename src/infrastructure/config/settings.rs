//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! `SDK_URL` overrides the SDK base URL.
//!
//! # Example
//!
//! ```no_run
//! use bulkpay::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("bulkpay.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::mock::MockConfig;
use super::processing::ProcessingConfig;
use super::sdk::{SdkConfig, SDK_URL_ENV};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Outbound SDK connection and parties.
    #[serde(default)]
    pub sdk: SdkConfig,

    /// Batch size and retry policy.
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Mock backend server.
    #[serde(default)]
    pub mock: MockConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when given, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`]; defaults are validated too, so a bad
    /// `SDK_URL` is still reported.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Initialize tracing from the `[logging]` section, raised by `verbose`.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.clone().with_verbosity(verbose).init();
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(SDK_URL_ENV) {
            if !url.trim().is_empty() {
                self.sdk.url = url.trim().to_string();
            }
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.sdk.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "sdk.url" }.into());
        }
        if let Err(e) = Url::parse(&self.sdk.url) {
            return Err(ConfigError::InvalidValue {
                field: "sdk.url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.sdk.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let parties = &self.sdk.parties;
        if parties.payer_fsp.is_empty() {
            return Err(ConfigError::MissingField { field: "payer_fsp" }.into());
        }
        if parties.payee_fsp.is_empty() {
            return Err(ConfigError::MissingField { field: "payee_fsp" }.into());
        }
        if parties.payer_msisdn.is_empty() {
            return Err(ConfigError::MissingField {
                field: "payer_msisdn",
            }
            .into());
        }

        if self.processing.transfers_per_bulk == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transfers_per_bulk",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.processing.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if let Some(bind) = &self.processing.callback_bind {
            if bind.parse::<std::net::SocketAddr>().is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "processing.callback_bind",
                    reason: format!("'{bind}' is not a socket address"),
                }
                .into());
            }
        }

        if self.mock.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "mock.bind",
                reason: format!("'{}' is not a socket address", self.mock.bind),
            }
            .into());
        }

        Ok(())
    }
}
