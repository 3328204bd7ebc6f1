//! Item and integration stores
//!
//! Trait-based access to the external stores the export job reads from and
//! updates, plus an in-memory implementation for local runs and tests.

pub mod memory;
pub mod traits;

pub use memory::{InMemoryStore, StoreSnapshot};
pub use traits::{IntegrationStore, LibraryItemStore};
