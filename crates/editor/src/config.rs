//! Editor configuration, read from environment variables.

use thiserror::Error;

use storefront_catalog::DEFAULT_MAX_IMAGE_BYTES;
use storefront_observability::{LogFormat, ParseLogFormatError};

pub const ENV_CURRENCY: &str = "STOREFRONT_CURRENCY";
pub const ENV_MAX_IMAGE_BYTES: &str = "STOREFRONT_MAX_IMAGE_BYTES";
pub const ENV_LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Symbol prefixed to every displayed price.
    pub currency: String,
    /// Largest accepted image, in bytes.
    pub max_image_bytes: u64,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STOREFRONT_MAX_IMAGE_BYTES must be a positive integer, got {0:?}")]
    MaxImageBytes(String),

    #[error("STOREFRONT_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            log_format: LogFormat::default(),
        }
    }
}

impl EditorConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let currency = lookup(ENV_CURRENCY).unwrap_or(defaults.currency);

        let max_image_bytes = match lookup(ENV_MAX_IMAGE_BYTES) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::MaxImageBytes(raw)),
            },
            None => defaults.max_image_bytes,
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => defaults.log_format,
        };

        Ok(Self {
            currency,
            max_image_bytes,
            log_format,
        })
    }
}
