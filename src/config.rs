//! Layered client configuration.
//!
//! Values are resolved from built-in defaults, then an optional
//! `planboard.toml`, then `PLANBOARD__`-prefixed environment variables
//! (for example `PLANBOARD__STORAGE__DOCUMENTS_BUCKET`).

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;

/// Base name of the optional configuration file.
pub const CONFIG_FILE_STEM: &str = "planboard";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "PLANBOARD";

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
const DEFAULT_DOCUMENTS_BUCKET: &str = "documents";
const DEFAULT_LOG_FILTER: &str = "info";

/// Hosted backend connection settings.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend.
    pub url: String,
    /// Public API key sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Object storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding task documents.
    pub documents_bucket: String,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, such as `info` or
    /// `planboard=debug`.
    pub filter: String,
    /// Colour the output.
    #[serde(default)]
    pub ansi: bool,
}

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Backend connection.
    pub backend: BackendConfig,
    /// Object storage.
    pub storage: StorageConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration from defaults, `planboard.toml` in the working
    /// directory if present, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE_STEM)
    }

    /// Loads configuration like [`ClientConfig::load`] from another file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value has the
    /// wrong type.
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name(file_stem).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from TOML text layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not valid TOML or a value
    /// has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("backend.url", DEFAULT_BACKEND_URL)?
        .set_default("storage.documents_bucket", DEFAULT_DOCUMENTS_BUCKET)?
        .set_default("logging.filter", DEFAULT_LOG_FILTER)?
        .set_default("logging.ansi", false)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
