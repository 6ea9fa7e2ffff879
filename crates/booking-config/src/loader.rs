//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use booking_core::BookingError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::debug;

/// Configuration loaded once at startup.
///
/// Degraded-but-valid setups do not fail the load; they are collected as
/// [`ConfigLoader::warnings`] for the caller to log once logging is up.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    warnings: Vec<String>,
}

impl ConfigLoader {
    /// Loads and validates the configuration.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `BOOKING__` prefix
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, BookingError> {
        let config = Self::load_config(config_dir.as_ref())?;
        let warnings = Self::validate_config(&config)?;

        Ok(Self { config, warnings })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, BookingError> {
        Self::new("./config")
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Degraded setups found while validating.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, BookingError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("BOOKING_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("BOOKING")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(config_error_to_booking_error)
    }

    /// Rejects invalid configuration and lists degraded setups.
    fn validate_config(config: &AppConfig) -> Result<Vec<String>, BookingError> {
        if let Err(errors) = ConfigValidator::validate(config) {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(BookingError::Configuration(message));
        }

        let mut warnings = Vec::new();

        if !config.graph.has_credentials() {
            warnings.push(
                "Booking API credentials are not configured; upstream requests will be rejected"
                    .to_string(),
            );
        }

        Ok(warnings)
    }
}

fn config_error_to_booking_error(err: ConfigError) -> BookingError {
    BookingError::Configuration(err.to_string())
}
