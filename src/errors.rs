use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::ConfigError;

/// Error type that captures precondition failures of the proration kernel.
#[derive(Debug, Error)]
pub enum ProrationError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
    #[error("Invalid precision: scale {scale} exceeds the maximum of {max}")]
    InvalidPrecision { scale: u32, max: u32 },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ProrationError>;

impl From<ConfigError> for ProrationError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(inner) => inner,
            other => ProrationError::Config(other.to_string()),
        }
    }
}
