//! Dispatch outcomes and reporting
//!
//! This module defines the per-integration outcome of an export-item job and
//! the report that collects them.

use crate::domain::{IntegrationId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Result of exporting to one integration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BranchOutcome {
    /// The client accepted the items and `synced_at` was persisted
    Synced { synced_at: DateTime<Utc> },

    /// The client refused the items
    Rejected,

    /// The client or the store failed unexpectedly
    Fault { message: String },

    /// Dry run: the client was resolved but not called
    Planned,
}

impl BranchOutcome {
    /// Whether the integration was synced
    pub fn is_synced(&self) -> bool {
        matches!(self, BranchOutcome::Synced { .. })
    }
}

/// Outcome for a single integration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationOutcome {
    pub integration_id: IntegrationId,
    pub name: String,
    #[serde(flatten)]
    pub outcome: BranchOutcome,
}

/// Why a dispatch ended before fanning out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStop {
    /// None of the requested items belong to the user
    NoItems,

    /// No enabled export integration matched
    NoIntegrations,
}

/// Report of one export-item job
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    /// Identifier of this run, also recorded on the `export_item` span
    pub job_id: Uuid,

    /// User the job ran for
    pub user_id: UserId,

    /// Number of library items resolved for the user
    pub items_resolved: usize,

    /// Set when the job ended before any client was called
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped: Option<DispatchStop>,

    /// One entry per targeted integration, in lookup order
    pub outcomes: Vec<IntegrationOutcome>,

    /// Wall time of the job
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl DispatchReport {
    /// Create an empty report for a user
    pub fn new(job_id: Uuid, user_id: UserId) -> Self {
        Self {
            job_id,
            user_id,
            items_resolved: 0,
            stopped: None,
            outcomes: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Mark the report as stopped early
    pub fn stopped(mut self, reason: DispatchStop) -> Self {
        self.stopped = Some(reason);
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of synced integrations
    pub fn synced_count(&self) -> usize {
        self.count(|o| o.is_synced())
    }

    /// Number of integrations that refused the items
    pub fn rejected_count(&self) -> usize {
        self.count(|o| matches!(o, BranchOutcome::Rejected))
    }

    /// Number of integrations that failed
    pub fn fault_count(&self) -> usize {
        self.count(|o| matches!(o, BranchOutcome::Fault { .. }))
    }

    /// Outcome for a given integration, if it was targeted
    pub fn outcome_for(&self, id: &IntegrationId) -> Option<&BranchOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.integration_id == *id)
            .map(|o| &o.outcome)
    }

    /// True when no integration was rejected or faulted
    pub fn is_successful(&self) -> bool {
        self.rejected_count() == 0 && self.fault_count() == 0
    }

    fn count(&self, predicate: impl Fn(&BranchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.outcome)).count()
    }

    /// Log the report
    ///
    /// Logged at debug level so a job with nothing to do stays quiet.
    pub fn log_summary(&self) {
        tracing::debug!(
            job_id = %self.job_id,
            user_id = %self.user_id,
            items_resolved = self.items_resolved,
            integrations = self.outcomes.len(),
            synced = self.synced_count(),
            rejected = self.rejected_count(),
            faults = self.fault_count(),
            stopped = ?self.stopped,
            duration_ms = self.duration.as_millis() as u64,
            "Export job completed"
        );
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
