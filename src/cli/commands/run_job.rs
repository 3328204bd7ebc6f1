//! Run-job command implementation
//!
//! Runs a queued job by name from a JSON payload file, the way the worker
//! would receive it.

use super::{build_dispatcher, load_command_config, print_report};
use crate::core::jobs::run_job;
use crate::domain::FerryError;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the run-job command
#[derive(Args, Debug)]
pub struct RunJobArgs {
    /// Job name (e.g. export-item)
    #[arg(short, long)]
    pub name: String,

    /// Path to the JSON job payload
    #[arg(short, long)]
    pub payload: PathBuf,

    /// JSON store snapshot with library items and integrations
    #[arg(short, long, env = "FERRY_STORE")]
    pub store: PathBuf,

    /// Dry run mode - resolve targets without calling integrations
    #[arg(long)]
    pub dry_run: bool,
}

impl RunJobArgs {
    /// Execute the run-job command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_command_config(config_path) else {
            return Ok(2);
        };

        let payload = tokio::fs::read_to_string(&self.payload).await?;
        let (dispatcher, _store) = build_dispatcher(&config, &self.store, self.dry_run).await?;

        tracing::info!(job = %self.name, "Running job");
        match run_job(&dispatcher, &self.name, &payload).await {
            Ok(report) => {
                print_report(&report);
                Ok(0)
            }
            Err(e @ (FerryError::Job(_) | FerryError::Serialization(_))) => {
                eprintln!("Invalid job: {e}");
                Ok(2)
            }
            Err(e) => {
                tracing::error!(error = %e, job = %self.name, "Job failed");
                eprintln!("Job failed: {e}");
                Ok(5)
            }
        }
    }
}
