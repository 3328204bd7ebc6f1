// Ferry - Library export worker
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

//! # Ferry - Library export worker
//!
//! Ferry runs the `export-item` job of a read-it-later service: it pushes a
//! user's saved library items to the third-party services the user has
//! connected (Readwise, Pocket) and records when each one was last synced.
//!
//! ## Architecture
//!
//! Ferry follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export dispatcher, job routing)
//! - [`adapters`] - External integrations (export clients, stores)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferry::adapters::integrations::IntegrationClientRegistry;
//! use ferry::adapters::store::InMemoryStore;
//! use ferry::config::load_config;
//! use ferry::core::jobs::{run_job, EXPORT_ITEM_JOB_NAME};
//! use ferry::core::export::ExportDispatcher;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ferry.toml")?;
//!     let store = Arc::new(InMemoryStore::load_json("store.json").await?);
//!     let clients = Arc::new(IntegrationClientRegistry::from_config(&config.integrations)?);
//!     let dispatcher = ExportDispatcher::new(store.clone(), store, clients);
//!
//!     let payload = r#"{"userId":"u1","libraryItemIds":["i1","i2"]}"#;
//!     let report = run_job(&dispatcher, EXPORT_ITEM_JOB_NAME, payload).await?;
//!
//!     println!("Synced {} integrations", report.synced_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! Every integration is exported independently. A refused export or a
//! network failure is logged and recorded in the report without affecting
//! the other integrations. Only an integration whose name has no registered
//! client fails the job, and only after the others have finished.
//!
//! ## Error Handling
//!
//! Ferry uses the [`domain::FerryError`] type for all errors:
//!
//! ```rust,no_run
//! use ferry::domain::FerryError;
//!
//! fn example() -> Result<(), FerryError> {
//!     let config = ferry::config::load_config("ferry.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Ferry uses structured logging with the `tracing` crate. Export events
//! carry `user_id` and `integration_id` fields:
//!
//! ```rust,no_run
//! use ferry::log_export_start;
//! use ferry::domain::{IntegrationId, UserId};
//!
//! # fn example() -> Result<(), String> {
//! let user_id = UserId::new("u1")?;
//! let integration_id = IntegrationId::new("g1")?;
//! log_export_start!(user_id, integration_id);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
