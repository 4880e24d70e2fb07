//! # Configuration State
//!
//! Marketplace configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`artvault.toml`, or `--config PATH`)
//! 3. Environment variables (`ARTVAULT_*`)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use artvault_core::validation::validate_tax_rate_bps;
use artvault_core::{TaxRate, DEFAULT_TAX_RATE_BPS};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "artvault.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the CLI banner and notifications
    pub marketplace_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Sales tax in basis points, e.g. 800 = 8%
    pub tax_rate_bps: u32,

    /// How long the simulated payment takes
    pub payment_delay_ms: u64,

    /// Storage database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Name: "ArtVault"
    /// - Currency: $ with 2 decimals
    /// - Tax: 8%
    /// - Payment delay: 2 seconds
    fn default() -> Self {
        ConfigState {
            marketplace_name: "ArtVault".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            payment_delay_ms: 2000,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the default path is optional.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to `path` (creating parent directories).
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_tax_rate_bps(self.tax_rate_bps)
            .map_err(|_| ConfigError::Invalid("tax rate must be between 0% and 100%".into()))?;

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "currency_decimals must be at most 4".into(),
            ));
        }

        if self.marketplace_name.trim().is_empty() {
            return Err(ConfigError::Invalid("marketplace name is required".into()));
        }

        Ok(())
    }

    /// Applies `ARTVAULT_*` environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `ARTVAULT_MARKETPLACE_NAME`: marketplace name
    /// - `ARTVAULT_TAX_RATE`: tax rate as a percentage (e.g., "8.25")
    /// - `ARTVAULT_PAYMENT_DELAY_MS`: simulated payment delay
    /// - `ARTVAULT_DB_PATH`: storage database file
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("ARTVAULT_MARKETPLACE_NAME") {
            self.marketplace_name = name;
        }

        if let Some(rate) = lookup("ARTVAULT_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    debug!(rate = %rate, "Overriding tax rate from environment");
                    self.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring unparsable ARTVAULT_TAX_RATE"),
            }
        }

        if let Some(delay) = lookup("ARTVAULT_PAYMENT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.payment_delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Ignoring unparsable ARTVAULT_PAYMENT_DELAY_MS"),
            }
        }

        if let Some(path) = lookup("ARTVAULT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "artvault", "artvault")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The configured sales tax.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// The simulated payment delay.
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use artvault_app::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(45000), "$450.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
