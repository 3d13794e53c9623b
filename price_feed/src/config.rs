//! Runtime configuration for the price feed.
//!
//! Loaded from an optional TOML file (see `configs/price_feed.toml`); every
//! field has a default. The API key itself never lives in the file: the file
//! only names the environment variable holding it.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use shared_utils::config::{ConfigError, load_toml_or_default};

use crate::{models::request_params::OutputSize, providers::alpha_vantage::DEFAULT_BASE_URL};

/// Environment variable read for the API key unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Query endpoint of the market data API.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout. Zero is treated as one second.
    pub timeout_secs: u64,
    /// History length requested when the caller does not say.
    pub output_size: OutputSize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_size: OutputSize::default(),
        }
    }
}

impl FeedConfig {
    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = load_toml_or_default(path)?;
        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "feed config loaded"
        );
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
