//! Configuration - defaults, `~/.pulseboard/config.yaml`, then environment

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_LOG_FILE,
    DEFAULT_REQUEST_TIMEOUT_SECS, ENV_ACTIVATION_TIMEOUT, ENV_API_URL, ENV_LOG_FILE,
    ENV_REQUEST_TIMEOUT, HEALTH_ID, HEALTH_PATH, MESSAGE_ID, MESSAGE_PATH,
};
use crate::models::FetchRequest;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend, e.g. `http://localhost:8000`
    pub api_url: String,
    pub request_timeout_secs: u64,
    /// Deadline for a whole activation; unset means wait for the client timeouts
    pub activation_timeout_secs: Option<u64>,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            activation_timeout_secs: None,
            log_file: String::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load defaults, the user config file if present, and env overrides
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply `PULSEBOARD_*` overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| {
                    format!("{} must be a whole number of seconds", ENV_REQUEST_TIMEOUT)
                })?;
        }
        if let Some(secs) = lookup(ENV_ACTIVATION_TIMEOUT) {
            let secs = secs.trim();
            self.activation_timeout_secs = if secs.is_empty() {
                None
            } else {
                Some(secs.parse().with_context(|| {
                    format!("{} must be a whole number of seconds", ENV_ACTIVATION_TIMEOUT)
                })?)
            };
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.log_file = file;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.activation_timeout_secs == Some(0) {
            bail!("activation_timeout_secs must be greater than zero when set");
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url(), HEALTH_PATH)
    }

    pub fn message_url(&self) -> String {
        format!("{}{}", self.base_url(), MESSAGE_PATH)
    }

    /// The pair of requests every activation issues, health first
    pub fn fetch_requests(&self) -> [FetchRequest; 2] {
        [
            FetchRequest::new(HEALTH_ID, self.health_url()),
            FetchRequest::new(MESSAGE_ID, self.message_url()),
        ]
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn activation_timeout(&self) -> Option<Duration> {
        self.activation_timeout_secs.map(Duration::from_secs)
    }
}

/// `~/.pulseboard/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
