//! Export-item job execution
//!
//! This module provides:
//! - The dispatcher that fans a job out to a user's export integrations
//! - Per-integration outcomes and the job report

pub mod dispatcher;
pub mod report;

pub use dispatcher::ExportDispatcher;
pub use report::{BranchOutcome, DispatchReport, DispatchStop, IntegrationOutcome};
