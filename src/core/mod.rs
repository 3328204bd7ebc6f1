//! Core business logic for Ferry.
//!
//! # Modules
//!
//! - [`export`] - The export-item dispatcher and its report
//! - [`jobs`] - Job names and payload routing
//!
//! # Export Workflow
//!
//! 1. **Resolve items**: Load the requested library items owned by the user
//! 2. **Resolve integrations**: Find the user's enabled export integrations
//! 3. **Fan out**: Export the items to every integration concurrently
//! 4. **Record**: Persist `synced_at` on each integration that accepted them
//!
//! # Example
//!
//! ```rust,no_run
//! use ferry::adapters::integrations::IntegrationClientRegistry;
//! use ferry::adapters::store::InMemoryStore;
//! use ferry::config::load_config;
//! use ferry::core::export::ExportDispatcher;
//! use ferry::domain::{ExportJobRequest, LibraryItemId, UserId};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ferry.toml")?;
//! let store = Arc::new(InMemoryStore::load_json("store.json").await?);
//! let clients = Arc::new(IntegrationClientRegistry::from_config(&config.integrations)?);
//!
//! let dispatcher = ExportDispatcher::new(store.clone(), store, clients);
//! let request = ExportJobRequest::new(UserId::new("u1")?, vec![LibraryItemId::new("i1")?]);
//!
//! let report = dispatcher.dispatch(&request).await?;
//! println!("Synced: {}", report.synced_count());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod jobs;
