//! Configuration management for Ferry.
//!
//! Ferry reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FERRY_*` environment overrides
//! - Default values for every optional setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ferry::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ferry.toml")?;
//! println!("Readwise API: {}", config.integrations.readwise.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [integrations.readwise]
//! base_url = "https://readwise.io/api/v2"
//! highlight_base_url = "https://omnivore.app"
//!
//! [integrations.pocket]
//! consumer_key = "${FERRY_POCKET_CONSUMER_KEY}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/ferry"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, FerryConfig, IntegrationsConfig, LoggingConfig, PocketConfig,
    ReadwiseConfig, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
