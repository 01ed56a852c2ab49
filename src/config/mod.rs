use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;
use log::info;
use thiserror::Error;

mod logging;
mod signing;
mod wallet;

pub use logging::LoggingConfig;
pub use signing::SigningConfig;
pub use wallet::WalletConfig;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Main configuration for the wallet tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key and address defaults
    pub wallet: WalletConfig,

    /// Signed-message settings
    pub signing: SigningConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&config_str)?)
    }

    /// Load configuration from a file, falling back to defaults if it is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str).map_err(ConfigError::Write)
    }

    /// Generate a default configuration file if it doesn't exist
    pub fn generate_default<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if path.exists() {
            info!("Config file already exists at {:?}", path);
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ConfigError::Write)?;
            }
        }

        Config::default().save(path)?;

        info!("Generated default config at {:?}", path);
        Ok(())
    }
}
