//! Application constants
//!
//! Centralized location for endpoint paths and configuration defaults.

/// Backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout applied by the HTTP client
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Log file written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "pulseboard.log";

/// Directory under `$HOME` holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".pulseboard";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

// Environment overrides
pub const ENV_API_URL: &str = "PULSEBOARD_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "PULSEBOARD_REQUEST_TIMEOUT_SECS";
pub const ENV_ACTIVATION_TIMEOUT: &str = "PULSEBOARD_ACTIVATION_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "PULSEBOARD_LOG_FILE";

/// Request identifiers, in tie-break order
pub const HEALTH_ID: &str = "health";
pub const MESSAGE_ID: &str = "message";

pub const HEALTH_PATH: &str = "/api/health";
pub const MESSAGE_PATH: &str = "/api/message";

/// Application name
pub const APP_NAME: &str = "Pulseboard";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
