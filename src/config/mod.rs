//! Persistent precision configuration.
//!
//! The money-precision policy is owned by the embedding application. This
//! module only loads and stores it as JSON so callers can hand a validated
//! [`PrecisionPolicy`] to the calculators.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{errors::ProrationError, precision::PrecisionPolicy};

const CONFIG_DIR_NAME: &str = "invoice_proration";
const CONFIG_FILE_NAME: &str = "config.json";
const STAGING_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Validation(#[from] ProrationError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub precision: PrecisionPolicy,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.precision.validate()?;
        Ok(())
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE_NAME)))
    }

    /// Manager rooted in [`default_config_dir`], creating it if needed.
    pub fn default_location() -> Result<Self, ConfigError> {
        Self::with_base_dir(default_config_dir())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        let config: Config =
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        config.validate()?;
        info!(
            path = %self.config_path.display(),
            scale = config.precision.scale(),
            rounding = ?config.precision.rounding_mode(),
            "loaded precision config"
        );
        Ok(config)
    }

    /// Validates `config` and writes it through a staging file that is renamed
    /// over the target.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes =
            serde_json::to_vec_pretty(config).map_err(|err| ConfigError::Serde(err.to_string()))?;
        let staging = self.staging_path();
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &self.config_path)?;
        debug!(path = %self.config_path.display(), "saved precision config");
        Ok(())
    }

    /// `config.json` is staged as `config.json.tmp` in the same directory.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .config_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(CONFIG_FILE_NAME));
        name.push(STAGING_SUFFIX);
        self.config_path.with_file_name(name)
    }
}

/// Platform configuration directory for this crate, or `./invoice_proration`
/// when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}
