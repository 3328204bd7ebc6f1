//! Export command implementation
//!
//! This module implements the `export` command, which runs the export-item
//! job locally against a JSON store snapshot.

use super::{build_dispatcher, load_command_config, print_report};
use crate::domain::{ExportJobRequest, IntegrationId, LibraryItemId, UserId};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON store snapshot with library items and integrations
    #[arg(short, long, env = "FERRY_STORE")]
    pub store: PathBuf,

    /// User to export for
    #[arg(short, long)]
    pub user: String,

    /// Library item ID(s) to export (comma-separated)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub items: Vec<String>,

    /// Export to this integration only
    #[arg(long)]
    pub integration: Option<String>,

    /// Dry run mode - resolve targets without calling integrations
    #[arg(long)]
    pub dry_run: bool,

    /// Write the updated snapshot back to the store file
    #[arg(long)]
    pub save: bool,
}

impl ExportArgs {
    /// Build the job request from the arguments
    pub fn request(&self) -> Result<ExportJobRequest, String> {
        let user_id = UserId::new(self.user.trim())?;
        let item_ids = self
            .items
            .iter()
            .map(|id| LibraryItemId::new(id.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut request = ExportJobRequest::new(user_id, item_ids);
        if let Some(ref integration) = self.integration {
            request = request.with_integration(IntegrationId::new(integration.trim())?);
        }
        Ok(request)
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let Some(config) = load_command_config(config_path) else {
            return Ok(2);
        };

        let request = match self.request() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Invalid arguments: {e}");
                return Ok(2);
            }
        };

        let (dispatcher, store) = build_dispatcher(&config, &self.store, self.dry_run).await?;
        if dispatcher.is_dry_run() {
            println!("🔍 DRY RUN MODE - No integration will be called");
        }

        let exit_code = match dispatcher.dispatch(&request).await {
            Ok(report) => {
                print_report(&report);
                0
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                5
            }
        };

        // Branches that synced before a failure have already reached the service
        if self.save && !dispatcher.is_dry_run() {
            store.save_json(&self.store).await?;
            tracing::info!(path = %self.store.display(), "Store snapshot saved");
        }

        Ok(exit_code)
    }
}
