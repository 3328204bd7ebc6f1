//! Job routing
//!
//! Jobs arrive from the queue as a name plus a JSON payload. This module maps
//! names to handlers and decodes payloads.

use crate::core::export::{DispatchReport, ExportDispatcher};
use crate::domain::{ExportJobRequest, FerryError, Result};

/// Queue name of the export-item job
pub const EXPORT_ITEM_JOB_NAME: &str = "export-item";

/// Decode an export-item payload
///
/// # Errors
///
/// Returns [`FerryError::Serialization`] if the payload is not a valid request.
pub fn parse_export_request(payload: &str) -> Result<ExportJobRequest> {
    serde_json::from_str(payload).map_err(|e| {
        FerryError::Serialization(format!("Invalid {EXPORT_ITEM_JOB_NAME} payload: {e}"))
    })
}

/// Run a named job with its JSON payload
///
/// # Errors
///
/// Returns [`FerryError::Job`] for an unknown job name, a serialization
/// error for a bad payload, and whatever the job itself returns.
pub async fn run_job(
    dispatcher: &ExportDispatcher,
    name: &str,
    payload: &str,
) -> Result<DispatchReport> {
    match name {
        EXPORT_ITEM_JOB_NAME => {
            let request = parse_export_request(payload)?;
            tracing::debug!(
                job = name,
                user_id = %request.user_id,
                items = request.library_item_ids.len(),
                "Running job"
            );
            dispatcher.dispatch(&request).await
        }
        other => Err(FerryError::Job(format!("Unknown job: {other}"))),
    }
}
