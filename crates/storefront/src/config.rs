//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HANDSET_HUB_DATA_DIR` - Directory with the catalog JSON files (default: data)
//! - `HANDSET_HUB_STATE_DIR` - Directory for durable selection lists (default: .handset-hub)
//! - `HANDSET_HUB_TOAST_MS` - Notification auto-dismiss in milliseconds (default: 3000)
//!
//! Currency symbol, digit grouping, and the checkout contact are not
//! environment settings; they come from the catalog's `settings.json`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DATA_DIR_VAR: &str = "HANDSET_HUB_DATA_DIR";
const STATE_DIR_VAR: &str = "HANDSET_HUB_STATE_DIR";
const TOAST_MS_VAR: &str = "HANDSET_HUB_TOAST_MS";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STATE_DIR: &str = ".handset-hub";
const DEFAULT_TOAST_MS: &str = "3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the six catalog files
    pub data_dir: PathBuf,
    /// Directory holding durable selection-list records
    pub state_dir: PathBuf,
    /// How long notifications stay visible
    pub dismiss_after: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            dismiss_after: crate::notify::DEFAULT_DISMISS_AFTER,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default(DATA_DIR_VAR, DEFAULT_DATA_DIR));
        let state_dir = PathBuf::from(get_env_or_default(STATE_DIR_VAR, DEFAULT_STATE_DIR));
        let dismiss_after = parse_dismiss_ms(&get_env_or_default(TOAST_MS_VAR, DEFAULT_TOAST_MS))?;

        Ok(Self {
            data_dir,
            state_dir,
            dismiss_after,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a positive millisecond count.
fn parse_dismiss_ms(value: &str) -> Result<Duration, ConfigError> {
    let millis = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(TOAST_MS_VAR.to_string(), e.to_string()))?;
    if millis == 0 {
        return Err(ConfigError::InvalidEnvVar(
            TOAST_MS_VAR.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dismiss_ms_valid() {
        assert_eq!(parse_dismiss_ms("3000").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_dismiss_ms(" 250 ").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_dismiss_ms_rejects_zero() {
        let err = parse_dismiss_ms("0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_dismiss_ms_rejects_garbage() {
        assert!(parse_dismiss_ms("soon").is_err());
        assert!(parse_dismiss_ms("-5").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.state_dir, PathBuf::from(".handset-hub"));
        assert_eq!(config.dismiss_after, Duration::from_millis(3000));
    }
}
