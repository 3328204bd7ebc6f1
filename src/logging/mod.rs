//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output
//! - Optional JSON file logging with rotation
//! - Phase macros so every export event carries `user_id` and `integration_id`
//!
//! # Example
//!
//! ```no_run
//! use ferry::logging::init_logging;
//! use ferry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Worker started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export to one integration
///
/// # Example
///
/// ```no_run
/// use ferry::log_export_start;
/// use ferry::domain::{IntegrationId, UserId};
///
/// let user_id = UserId::new("u1").unwrap();
/// let integration_id = IntegrationId::new("g1").unwrap();
/// log_export_start!(&user_id, &integration_id);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($user_id:expr, $integration_id:expr) => {
        tracing::info!(
            user_id = %$user_id,
            integration_id = %$integration_id,
            "exporting item..."
        );
    };
}

/// Log an integration that refused the export
#[macro_export]
macro_rules! log_export_rejected {
    ($user_id:expr, $integration_id:expr) => {
        tracing::error!(
            user_id = %$user_id,
            integration_id = %$integration_id,
            "failed to export item"
        );
    };
}

/// Log an unexpected fault while exporting to an integration
#[macro_export]
macro_rules! log_export_fault {
    ($user_id:expr, $integration_id:expr, $error:expr) => {
        tracing::error!(
            user_id = %$user_id,
            integration_id = %$integration_id,
            error = %$error,
            "export with integration failed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use ferry::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "rate limited");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}
