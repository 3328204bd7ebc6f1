//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{FerryConfig, PocketConfig};
use super::secret::secret_string;
use crate::domain::errors::FerryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FerryConfig
/// 4. Applies environment variable overrides (FERRY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ferry::config::loader::load_config;
///
/// let config = load_config("ferry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FerryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FerryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FerryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from a file, falling back to defaults when it is absent
///
/// Environment overrides and validation still apply to the defaults, so a
/// worker can be configured purely through `FERRY_*` variables.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<FerryConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::warn!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = FerryConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        FerryError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<FerryConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: FerryConfig = toml::from_str(&contents)
        .map_err(|e| FerryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        FerryError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(FerryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using FERRY_* prefix
///
/// Environment variables follow the pattern: FERRY_<SECTION>_<KEY>
/// For example: FERRY_APPLICATION_LOG_LEVEL, FERRY_POCKET_CONSUMER_KEY
fn apply_env_overrides(config: &mut FerryConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("FERRY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("FERRY_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Readwise overrides
    if let Ok(val) = std::env::var("FERRY_READWISE_ENABLED") {
        config.integrations.readwise.enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("FERRY_READWISE_BASE_URL") {
        config.integrations.readwise.base_url = val;
    }
    if let Ok(val) = std::env::var("FERRY_READWISE_HIGHLIGHT_BASE_URL") {
        config.integrations.readwise.highlight_base_url = val;
    }
    if let Ok(val) = std::env::var("FERRY_READWISE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.integrations.readwise.timeout_seconds = timeout;
        }
    }

    // Pocket overrides; a consumer key alone is enough to register the client
    if let Ok(val) = std::env::var("FERRY_POCKET_CONSUMER_KEY") {
        match config.integrations.pocket {
            Some(ref mut pocket) => pocket.consumer_key = secret_string(val),
            None => {
                config.integrations.pocket = Some(PocketConfig {
                    base_url: "https://getpocket.com".to_string(),
                    consumer_key: secret_string(val),
                    timeout_seconds: 10,
                })
            }
        }
    }
    if let Some(ref mut pocket) = config.integrations.pocket {
        if let Ok(val) = std::env::var("FERRY_POCKET_BASE_URL") {
            pocket.base_url = val;
        }
        if let Ok(val) = std::env::var("FERRY_POCKET_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                pocket.timeout_seconds = timeout;
            }
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
