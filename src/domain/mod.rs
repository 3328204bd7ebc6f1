//! Domain models and types for Ferry.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`UserId`], [`LibraryItemId`], [`IntegrationId`])
//! - **Domain models** ([`LibraryItem`], [`Integration`], [`ExportJobRequest`])
//! - **Error types** ([`FerryError`], [`StoreError`], [`IntegrationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so a user ID can't be passed where an integration
//! ID is expected:
//!
//! ```rust
//! use ferry::domain::{IntegrationId, UserId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let user_id = UserId::new("u1")?;
//! let integration_id = IntegrationId::new("g1")?;
//!
//! // let wrong: UserId = integration_id;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod integration;
pub mod job;
pub mod library_item;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{FerryError, IntegrationError, StoreError};
pub use ids::{HighlightId, IntegrationId, LibraryItemId, UserId};
pub use integration::{Integration, IntegrationFilter, IntegrationType, IntegrationUpdate};
pub use job::ExportJobRequest;
pub use library_item::{Highlight, HighlightType, LibraryItem, LibraryItemBuilder};
pub use result::Result;
