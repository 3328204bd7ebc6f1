//! Configuration schema types
//!
//! This module defines the configuration structure for Ferry.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main Ferry configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FerryConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export client settings
    #[serde(default)]
    pub integrations: IntegrationsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FerryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.integrations.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Resolve items and integrations without calling export clients
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration for rate-limited requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err(format!("{section}.retry.max_retries must be at most 10"));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "{section}.retry.backoff_multiplier must be at least 1.0"
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "{section}.retry.initial_delay_ms cannot exceed max_delay_ms"
            ));
        }
        Ok(())
    }

    /// Delay before the given retry (1-based), capped at `max_delay_ms`
    pub fn delay_for_attempt(&self, attempt: usize) -> u64 {
        let factor = self
            .backoff_multiplier
            .powi(attempt.saturating_sub(1) as i32);
        let delay = (self.initial_delay_ms as f64 * factor) as u64;
        delay.min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Export client configuration
///
/// A client is registered at startup only when its section is enabled;
/// integrations naming an unregistered client fail the job.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntegrationsConfig {
    /// Readwise highlights export
    #[serde(default)]
    pub readwise: ReadwiseConfig,

    /// Pocket export (requires a consumer key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pocket: Option<PocketConfig>,
}

impl IntegrationsConfig {
    fn validate(&self) -> Result<(), String> {
        self.readwise.validate()?;
        if let Some(ref pocket) = self.pocket {
            pocket.validate()?;
        }
        Ok(())
    }
}

/// Readwise client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadwiseConfig {
    /// Register the Readwise client
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Readwise API base URL
    #[serde(default = "default_readwise_base_url")]
    pub base_url: String,

    /// Web client base URL used to build highlight links
    #[serde(default = "default_highlight_base_url")]
    pub highlight_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_readwise_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry policy for HTTP 429 responses
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ReadwiseConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        validate_http_url("integrations.readwise.base_url", &self.base_url)?;
        validate_http_url(
            "integrations.readwise.highlight_base_url",
            &self.highlight_base_url,
        )?;
        if self.timeout_seconds == 0 {
            return Err("integrations.readwise.timeout_seconds must be greater than 0".to_string());
        }
        self.retry.validate("integrations.readwise")
    }
}

impl Default for ReadwiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_readwise_base_url(),
            highlight_base_url: default_highlight_base_url(),
            timeout_seconds: default_readwise_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Pocket client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PocketConfig {
    /// Pocket API base URL
    #[serde(default = "default_pocket_base_url")]
    pub base_url: String,

    /// Application consumer key
    /// Stored securely in memory and automatically zeroized on drop
    pub consumer_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_pocket_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl PocketConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        validate_http_url("integrations.pocket.base_url", &self.base_url)?;
        if self.consumer_key.expose_secret().is_empty() {
            return Err("integrations.pocket.consumer_key cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("integrations.pocket.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "{field} must use http or https, got '{scheme}'"
        )),
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    8000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_readwise_base_url() -> String {
    "https://readwise.io/api/v2".to_string()
}

fn default_highlight_base_url() -> String {
    "https://omnivore.app".to_string()
}

fn default_readwise_timeout_seconds() -> u64 {
    5
}

fn default_pocket_base_url() -> String {
    "https://getpocket.com".to_string()
}

fn default_pocket_timeout_seconds() -> u64 {
    10
}

fn default_local_path() -> String {
    "/var/log/ferry".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_default_config_is_valid() {
        let config = FerryConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.integrations.readwise.enabled);
        assert!(config.integrations.pocket.is_none());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = FerryConfig::default();
        config.application.log_level = "verbose".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_invalid_readwise_url() {
        let mut config = FerryConfig::default();
        config.integrations.readwise.base_url = "ftp://readwise.io".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("must use http or https"));
    }

    #[test]
    fn test_disabled_readwise_skips_validation() {
        let mut config = FerryConfig::default();
        config.integrations.readwise.enabled = false;
        config.integrations.readwise.base_url = "not a url".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pocket_requires_consumer_key() {
        let mut config = FerryConfig::default();
        config.integrations.pocket = Some(PocketConfig {
            base_url: default_pocket_base_url(),
            consumer_key: secret_string(String::new()),
            timeout_seconds: 10,
        });

        let err = config.validate().unwrap_err();
        assert!(err.contains("consumer_key cannot be empty"));
    }

    #[test]
    fn test_retry_validation() {
        let retry = RetryConfig {
            max_retries: 20,
            ..Default::default()
        };
        assert!(retry.validate("integrations.readwise").is_err());
    }

    #[test]
    fn test_retry_delay_backoff_is_capped() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 1000,
            max_delay_ms: 3000,
            backoff_multiplier: 2.0,
        };

        assert_eq!(retry.delay_for_attempt(1), 1000);
        assert_eq!(retry.delay_for_attempt(2), 2000);
        assert_eq!(retry.delay_for_attempt(3), 3000);
        assert_eq!(retry.delay_for_attempt(4), 3000);
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = FerryConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
