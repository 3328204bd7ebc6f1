//! Integration domain model
//!
//! An integration is a third-party destination configured by a user. Export
//! integrations receive library items; the dispatcher only ever changes their
//! `synced_at` timestamp, through the integration store.

use super::ids::{IntegrationId, UserId};
use crate::config::SecretString;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntegrationType {
    /// Items are pushed from the library to the integration
    Export,
    /// Items are pulled from the integration into the library
    Import,
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationType::Export => write!(f, "EXPORT"),
            IntegrationType::Import => write!(f, "IMPORT"),
        }
    }
}

impl FromStr for IntegrationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EXPORT" => Ok(IntegrationType::Export),
            "IMPORT" => Ok(IntegrationType::Import),
            other => Err(format!(
                "Invalid integration type '{other}'. Must be one of: EXPORT, IMPORT"
            )),
        }
    }
}

/// A configured integration
///
/// The token is the credential the export client presents to the third-party
/// API. It is zeroized on drop and redacted from `Debug` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: IntegrationId,

    pub user_id: UserId,

    /// Client name, e.g. "READWISE"
    pub name: String,

    pub token: SecretString,

    pub enabled: bool,

    #[serde(rename = "type")]
    pub integration_type: IntegrationType,

    /// Last successful export
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
}

/// Filter used to look up a user's integrations
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationFilter {
    pub id: Option<IntegrationId>,
    pub enabled: Option<bool>,
    pub integration_type: Option<IntegrationType>,
}

impl IntegrationFilter {
    /// Filter for integrations that should receive exports
    pub fn enabled_exports(id: Option<IntegrationId>) -> Self {
        Self {
            id,
            enabled: Some(true),
            integration_type: Some(IntegrationType::Export),
        }
    }

    /// Check whether an integration satisfies the filter
    pub fn matches(&self, integration: &Integration) -> bool {
        self.id.as_ref().map_or(true, |id| *id == integration.id)
            && self.enabled.map_or(true, |e| e == integration.enabled)
            && self
                .integration_type
                .map_or(true, |t| t == integration.integration_type)
    }
}

/// Partial update applied to an integration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationUpdate {
    pub synced_at: Option<DateTime<Utc>>,
}

impl IntegrationUpdate {
    /// Record a successful sync at the given instant
    pub fn synced_at(at: DateTime<Utc>) -> Self {
        Self {
            synced_at: Some(at),
        }
    }

    /// Apply the update in place
    pub fn apply_to(&self, integration: &mut Integration) {
        if let Some(at) = self.synced_at {
            integration.synced_at = Some(at);
        }
    }
}
