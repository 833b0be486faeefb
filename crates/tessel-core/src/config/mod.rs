use anyhow::Result;
use config::Config;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_BLANK_NODE_PREFIX, DEFAULT_FORMAT, DEFAULT_LOG_LEVEL};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Options that shape the text produced by the writers.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Format name or alias handed to the writer factory.
    pub format: String,
    /// Write IRIs verbatim in Turtle instead of escaping them.
    pub trust_iris: bool,
    /// Escape every non-ASCII character in Turtle output.
    pub escape_unicode: bool,
    pub blank_node_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            trust_iris: false,
            escape_unicode: false,
            blank_node_prefix: DEFAULT_BLANK_NODE_PREFIX.to_string(),
        }
    }
}

impl OutputConfig {
    /// ## Summary
    /// Checks that the blank node prefix can start a label in every supported format.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the prefix is empty, does not start with
    /// an ASCII letter, or contains anything other than ASCII letters and digits.
    pub fn validate(&self) -> CoreResult<()> {
        let prefix = &self.blank_node_prefix;

        let starts_with_letter = prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());

        if !starts_with_letter || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::ConfigError(format!(
                "blank node prefix must be alphanumeric and start with a letter, got {prefix:?}"
            )));
        }

        if self.format.trim().is_empty() {
            return Err(CoreError::ConfigError("output format must not be empty".into()));
        }

        Ok(())
    }
}

/// Log filter for hosts that install a `tracing` subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `tessel_rdf=trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    /// ## Summary
    /// Checks that `level` parses as an `EnvFilter` directive.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` naming the rejected directive.
    pub fn validate(&self) -> CoreResult<()> {
        EnvFilter::try_new(self.level.as_str())
            .map(|_| ())
            .map_err(|e| CoreError::ConfigError(format!("invalid log level {:?}: {e}", self.level)))
    }

    /// ## Summary
    /// Builds the filter layer for a `tracing_subscriber` registry.
    ///
    /// An unparsable directive falls back to the default level.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.level.as_str()).unwrap_or_else(|e| {
            tracing::warn!(level = %self.level, error = %e, "Invalid log level in config, keeping default");
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        })
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `TESSEL__*` environment variables and an
    /// optional `tessel.toml`. Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the output or logging section fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("output.format", DEFAULT_FORMAT)?
            .set_default("output.trust_iris", false)?
            .set_default("output.escape_unicode", false)?
            .set_default("output.blank_node_prefix", DEFAULT_BLANK_NODE_PREFIX)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            // TOML file
            .add_source(config::File::with_name("tessel.toml").required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix("TESSEL")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.output.validate()?;
        settings.logging.validate()?;

        tracing::debug!(format = %settings.output.format, "Writer settings loaded");

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
