//! External system integrations for Ferry.
//!
//! This module provides adapters for the systems the export job talks to:
//!
//! - [`integrations`] - Export clients for third-party services (Readwise, Pocket)
//! - [`store`] - Library item and integration stores (trait-based)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the dispatcher can
//! be tested with fake clients and the in-memory store.
//!
//! ```rust,no_run
//! use ferry::adapters::integrations::IntegrationClientRegistry;
//! use ferry::config::IntegrationsConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = IntegrationClientRegistry::from_config(&IntegrationsConfig::default())?;
//! let readwise = registry.get("readwise")?;
//! assert_eq!(readwise.name(), "READWISE");
//! # Ok(())
//! # }
//! ```

pub mod integrations;
pub mod store;
