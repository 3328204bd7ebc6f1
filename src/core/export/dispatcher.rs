//! Export dispatcher - runs one export-item job
//!
//! Resolves the requested library items for a user, finds the user's enabled
//! export integrations, and pushes the items to every integration at once.
//! Branches are futures joined on the calling task; each ends in a
//! [`BranchOutcome`] so one integration failing never affects another.

use crate::adapters::integrations::{IntegrationClient, IntegrationClientRegistry};
use crate::adapters::store::{IntegrationStore, LibraryItemStore};
use crate::core::export::report::{BranchOutcome, DispatchReport, DispatchStop, IntegrationOutcome};
use crate::domain::{
    ExportJobRequest, Integration, IntegrationFilter, IntegrationUpdate, LibraryItem, Result,
    UserId,
};
use crate::{log_export_fault, log_export_rejected, log_export_start};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Export dispatcher
#[derive(Clone)]
pub struct ExportDispatcher {
    item_store: Arc<dyn LibraryItemStore>,
    integration_store: Arc<dyn IntegrationStore>,
    clients: Arc<IntegrationClientRegistry>,
    dry_run: bool,
}

impl ExportDispatcher {
    /// Create a new export dispatcher
    pub fn new(
        item_store: Arc<dyn LibraryItemStore>,
        integration_store: Arc<dyn IntegrationStore>,
        clients: Arc<IntegrationClientRegistry>,
    ) -> Self {
        Self {
            item_store,
            integration_store,
            clients,
            dry_run: false,
        }
    }

    /// Resolve and log targets without calling clients or updating the store
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether clients are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run the job, discarding the report
    ///
    /// # Errors
    ///
    /// Returns an error if a store lookup fails or an integration names a
    /// client that is not registered. Export failures of individual
    /// integrations are logged, not returned.
    pub async fn execute(&self, request: &ExportJobRequest) -> Result<()> {
        self.dispatch(request).await.map(|_| ())
    }

    /// Run the job and report the outcome of every integration
    ///
    /// # Errors
    ///
    /// Same as [`ExportDispatcher::execute`]. An unregistered client is only
    /// reported after every other integration has finished.
    pub async fn dispatch(&self, request: &ExportJobRequest) -> Result<DispatchReport> {
        let job_id = Uuid::new_v4();
        let span = tracing::info_span!("export_item", job_id = %job_id);
        self.run(job_id, request).instrument(span).await
    }

    async fn run(&self, job_id: Uuid, request: &ExportJobRequest) -> Result<DispatchReport> {
        let start_time = Instant::now();
        let user_id = &request.user_id;
        let mut report = DispatchReport::new(job_id, user_id.clone());

        let items = self
            .item_store
            .find_library_items_by_ids(&request.library_item_ids, user_id)
            .await?;
        if items.is_empty() {
            tracing::error!(user_id = %user_id, "library items not found");
            return Ok(report
                .stopped(DispatchStop::NoItems)
                .with_duration(start_time.elapsed()));
        }
        report.items_resolved = items.len();

        let filter = IntegrationFilter::enabled_exports(request.integration_id.clone());
        let integrations = self
            .integration_store
            .find_integrations(user_id, &filter)
            .await?;
        if integrations.is_empty() {
            tracing::debug!(user_id = %user_id, "No export integrations matched");
            return Ok(report
                .stopped(DispatchStop::NoIntegrations)
                .with_duration(start_time.elapsed()));
        }

        let branches = integrations
            .iter()
            .map(|integration| self.export_to(user_id, integration, &items));
        let results = join_all(branches).await;

        // Siblings have all finished; surface the first configuration fault
        for result in results {
            report.outcomes.push(result?);
        }

        let report = report.with_duration(start_time.elapsed());
        report.log_summary();
        Ok(report)
    }

    /// Export to one integration
    ///
    /// Only an unregistered client escapes as an error; everything else ends
    /// in an outcome.
    async fn export_to(
        &self,
        user_id: &UserId,
        integration: &Integration,
        items: &[LibraryItem],
    ) -> Result<IntegrationOutcome> {
        log_export_start!(user_id, integration.id);

        let client = self.clients.get(&integration.name).map_err(|e| {
            tracing::error!(
                user_id = %user_id,
                integration_id = %integration.id,
                name = %integration.name,
                "No client registered for integration"
            );
            e
        })?;

        let outcome = if self.dry_run {
            tracing::info!(
                user_id = %user_id,
                integration_id = %integration.id,
                client = client.name(),
                items = items.len(),
                "Dry run: skipping export"
            );
            BranchOutcome::Planned
        } else {
            match self.sync(client.as_ref(), user_id, integration, items).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log_export_fault!(user_id, integration.id, e);
                    BranchOutcome::Fault {
                        message: e.to_string(),
                    }
                }
            }
        };

        Ok(IntegrationOutcome {
            integration_id: integration.id.clone(),
            name: integration.name.clone(),
            outcome,
        })
    }

    async fn sync(
        &self,
        client: &dyn IntegrationClient,
        user_id: &UserId,
        integration: &Integration,
        items: &[LibraryItem],
    ) -> Result<BranchOutcome> {
        let synced = client.export(&integration.token, items).await?;
        if !synced {
            log_export_rejected!(user_id, integration.id);
            return Ok(BranchOutcome::Rejected);
        }

        let synced_at = Utc::now();
        tracing::info!(
            user_id = %user_id,
            integration_id = %integration.id,
            synced_at = %synced_at.to_rfc3339(),
            "updating integration..."
        );

        let updated = self
            .integration_store
            .update_integration(
                &integration.id,
                IntegrationUpdate::synced_at(synced_at),
                user_id,
            )
            .await?;

        tracing::info!(
            user_id = %user_id,
            integration_id = %updated.id,
            name = %updated.name,
            synced_at = ?updated.synced_at,
            "integration updated"
        );

        Ok(BranchOutcome::Synced { synced_at })
    }
}

impl std::fmt::Debug for ExportDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportDispatcher")
            .field("clients", &self.clients)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}
