//! Domain error types
//!
//! This module defines the error hierarchy for Ferry. Errors are domain-specific
//! and don't expose third-party types such as `reqwest::Error`.

use thiserror::Error;

/// Main Ferry error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum FerryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No export client is registered under the integration's name
    ///
    /// This indicates an inconsistency between stored integrations and the
    /// clients the process was started with, and is never handled per
    /// integration.
    #[error("Integration client not found: {0}")]
    UnregisteredClient(String),

    /// Item or integration store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Third-party integration errors
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Job routing errors
    #[error("Job error: {0}")]
    Job(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl FerryError {
    /// Whether the error signals a misconfigured process rather than a
    /// runtime condition
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            FerryError::UnregisteredClient(_) | FerryError::Configuration(_)
        )
    }
}

/// Store-specific errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Failed to read records
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Failed to update a record
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    /// Store is unavailable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while talking to a third-party integration
///
/// An expected rejection is reported by the client as `Ok(false)`; these
/// variants cover the unexpected faults (network, protocol, client-internal).
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Failed to reach the integration
    #[error("Failed to connect to {integration}: {message}")]
    ConnectionFailed {
        integration: String,
        message: String,
    },

    /// Request timed out
    #[error("Request to {integration} timed out: {message}")]
    Timeout {
        integration: String,
        message: String,
    },

    /// Response could not be understood
    #[error("Invalid response from {integration}: {message}")]
    InvalidResponse {
        integration: String,
        message: String,
    },

    /// Server error (5xx)
    #[error("{integration} server error: {status} - {message}")]
    ServerError {
        integration: String,
        status: u16,
        message: String,
    },

    /// Client-side failure building the request
    #[error("{integration} client error: {message}")]
    Client {
        integration: String,
        message: String,
    },
}

impl IntegrationError {
    /// Map a transport error from the HTTP client without leaking its type
    pub fn from_transport(integration: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            IntegrationError::Timeout {
                integration: integration.to_string(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            IntegrationError::InvalidResponse {
                integration: integration.to_string(),
                message: err.to_string(),
            }
        } else if err.is_builder() {
            IntegrationError::Client {
                integration: integration.to_string(),
                message: err.to_string(),
            }
        } else {
            IntegrationError::ConnectionFailed {
                integration: integration.to_string(),
                message: err.to_string(),
            }
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FerryError {
    fn from(err: std::io::Error) -> Self {
        FerryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FerryError {
    fn from(err: serde_json::Error) -> Self {
        FerryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FerryError {
    fn from(err: toml::de::Error) -> Self {
        FerryError::Configuration(format!("TOML parse error: {err}"))
    }
}
