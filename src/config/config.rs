// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::executor::rest::DEFAULT_API_VERSION;

const DEFAULT_CONFIG_PATH: &str = "extreg.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Org instance URL (e.g., "https://acme.my.salesforce.com")
    pub instance_url: Option<String>,

    /// REST API version used for every call
    pub api_version: String,

    /// Username the session belongs to
    pub target_username: Option<String>,

    /// OAuth access token for the target org
    pub access_token: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Send every query and insert through the tooling API
    pub use_tooling_api: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from TOML file with environment variable overrides
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with variables resolved through `lookup`
    pub fn load_with<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("EXTREG_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(Path::new(&config_path))?
        } else {
            Config::default()
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply `EXTREG_*` overrides
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("EXTREG_INSTANCE_URL") {
            self.instance_url = Some(val);
        }
        if let Some(val) = lookup("EXTREG_API_VERSION") {
            self.api_version = val;
        }
        if let Some(val) = lookup("EXTREG_TARGET_USERNAME") {
            self.target_username = Some(val);
        }
        if let Some(val) = lookup("EXTREG_ACCESS_TOKEN") {
            self.access_token = Some(val);
        }
        if let Some(val) = lookup("EXTREG_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = val
                .parse()
                .with_context(|| format!("Invalid EXTREG_REQUEST_TIMEOUT_SECS: {}", val))?;
        }
        if let Some(val) = lookup("EXTREG_USE_TOOLING_API") {
            self.use_tooling_api = val
                .parse()
                .with_context(|| format!("Invalid EXTREG_USE_TOOLING_API: {} (expected true or false)", val))?;
        }
        if let Some(val) = lookup("EXTREG_LOG_LEVEL") {
            self.log_level = val;
        }

        Ok(())
    }

    /// Reject values that would make every request fail
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs (EXTREG_REQUEST_TIMEOUT_SECS) must be greater than zero");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance_url: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            target_username: None,
            access_token: None,
            request_timeout_secs: 30,
            use_tooling_api: false,
            log_level: String::from("info"),
        }
    }
}
