//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section has defaults, and
//! the `HEDGEPOOL_DATABASE` environment variable overrides the database path.
//!
//! # Example
//!
//! ```no_run
//! use hedgepool::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::adapter::inbound::cli::paths;
use crate::application::advisor::{AdvisorDefaults, DEFAULT_BUFFER_PRESETS};
use crate::domain::closure::VoidPolicy;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "HEDGEPOOL_DATABASE";

/// Daily closure settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// How VOID wagers enter turnover and wager count.
    pub void_policy: VoidPolicy,
}

/// Hedge advisor defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Target profit as a percentage of the known stake (10 = 10%).
    pub target_pct: Decimal,
    /// Odds buffer applied when no `--buffer` is given.
    pub odds_buffer: Decimal,
    /// Buffers listed by `hedge --presets`.
    pub buffer_presets: Vec<Decimal>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        let defaults = AdvisorDefaults::default();
        Self {
            target_pct: defaults.target_pct,
            odds_buffer: defaults.odds_buffer,
            buffer_presets: DEFAULT_BUFFER_PRESETS.to_vec(),
        }
    }
}

impl From<&AdvisorConfig> for AdvisorDefaults {
    fn from(config: &AdvisorConfig) -> Self {
        Self {
            target_pct: config.target_pct,
            odds_buffer: config.odds_buffer,
            buffer_presets: config.buffer_presets.clone(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to `~/.hedgepool/hedgepool.db`.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Daily closure settings.
    #[serde(default)]
    pub settlement: SettlementConfig,

    /// Hedge advisor defaults.
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            settlement: SettlementConfig::default(),
            advisor: AdvisorConfig::default(),
        }
    }
}

fn default_database_path() -> String {
    paths::default_database().display().to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
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
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed or validated.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                self.database = database;
            }
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "logging.level" }.into());
        }
        if self.advisor.target_pct < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "advisor.target_pct",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.advisor.odds_buffer < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "advisor.odds_buffer",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.advisor.buffer_presets.iter().any(|b| *b < Decimal::ZERO) {
            return Err(ConfigError::InvalidValue {
                field: "advisor.buffer_presets",
                reason: "presets must be 0 or greater".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Advisor defaults derived from the `[advisor]` section.
    #[must_use]
    pub fn advisor_defaults(&self) -> AdvisorDefaults {
        AdvisorDefaults::from(&self.advisor)
    }
}
