//! Configuration for the validator and the HTTP server.
//!
//! Every key is optional; a missing file section falls back to the defaults
//! below.
//!
//! ```toml
//! [validator]
//! name_policy = "every_token"   # or "last_token"
//! expiry_window_years = 3
//!
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::expiry::DEFAULT_WINDOW_YEARS;
use crate::name::NamePolicy;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unexpected values.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The values parse but are not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Validation rules.
    #[serde(default)]
    pub validator: ValidatorConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings that change validation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// How cardholder name tokens are combined.
    #[serde(default)]
    pub name_policy: NamePolicy,
    /// Length of the expiry acceptance window in years.
    #[serde(default = "default_window_years")]
    pub expiry_window_years: u32,
}

fn default_window_years() -> u32 {
    DEFAULT_WINDOW_YEARS
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::default(),
            expiry_window_years: default_window_years(),
        }
    }
}

/// Listen address of `cardcheck-server`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for an expiry window of zero years.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.check()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&contents)
    }

    /// Loads the file at `path` if given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// As [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.validator.expiry_window_years == 0 {
            return Err(ConfigError::Invalid(
                "validator.expiry_window_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
