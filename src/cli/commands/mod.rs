//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod clients;
pub mod export;
pub mod run_job;
pub mod validate;

use crate::adapters::integrations::IntegrationClientRegistry;
use crate::adapters::store::InMemoryStore;
use crate::config::{load_config_or_default, FerryConfig};
use crate::core::export::{BranchOutcome, DispatchReport, ExportDispatcher};
use std::path::Path;
use std::sync::Arc;

/// Load configuration for a command, printing the failure
///
/// Returns `None` when the configuration is invalid (exit code 2).
pub(crate) fn load_command_config(config_path: &str) -> Option<FerryConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            None
        }
    }
}

/// Build a dispatcher backed by a JSON store snapshot
pub(crate) async fn build_dispatcher(
    config: &FerryConfig,
    store_path: &Path,
    dry_run: bool,
) -> anyhow::Result<(ExportDispatcher, Arc<InMemoryStore>)> {
    let store = Arc::new(InMemoryStore::load_json(store_path).await?);
    let clients = Arc::new(IntegrationClientRegistry::from_config(&config.integrations)?);

    let dispatcher = ExportDispatcher::new(store.clone(), store.clone(), clients)
        .with_dry_run(dry_run || config.application.dry_run);

    Ok((dispatcher, store))
}

/// Print a dispatch report
pub(crate) fn print_report(report: &DispatchReport) {
    println!();
    println!("📊 Export Summary:");
    println!("  User: {}", report.user_id);
    println!("  Items Resolved: {}", report.items_resolved);
    if let Some(stopped) = report.stopped {
        println!("  Stopped: {stopped:?}");
    }
    for outcome in &report.outcomes {
        let status = match &outcome.outcome {
            BranchOutcome::Synced { synced_at } => format!("synced at {}", synced_at.to_rfc3339()),
            BranchOutcome::Rejected => "rejected".to_string(),
            BranchOutcome::Fault { message } => format!("failed: {message}"),
            BranchOutcome::Planned => "planned (dry run)".to_string(),
        };
        println!("  {} ({}): {}", outcome.integration_id, outcome.name, status);
    }
    println!("  Duration: {:.2}s", report.duration.as_secs_f64());
    if !report.is_successful() {
        println!(
            "  ⚠️  {} rejected, {} failed",
            report.rejected_count(),
            report.fault_count()
        );
    }
    println!();
}
