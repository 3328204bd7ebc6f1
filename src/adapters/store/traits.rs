//! Store abstraction traits
//!
//! The export job reads library items and integrations from stores it does
//! not own. These traits are the seam between the dispatcher and whatever
//! backs those stores in a deployment.

use crate::domain::{
    Integration, IntegrationFilter, IntegrationId, IntegrationUpdate, LibraryItem, LibraryItemId,
    Result, UserId,
};
use async_trait::async_trait;

/// Read access to a user's library items
#[async_trait]
pub trait LibraryItemStore: Send + Sync {
    /// Find library items by ID, scoped to their owner
    ///
    /// IDs that don't exist or belong to another user are skipped, so the
    /// result may be shorter than `ids` or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    async fn find_library_items_by_ids(
        &self,
        ids: &[LibraryItemId],
        user_id: &UserId,
    ) -> Result<Vec<LibraryItem>>;
}

/// Access to a user's configured integrations
#[async_trait]
pub trait IntegrationStore: Send + Sync {
    /// Find the user's integrations matching a filter
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    async fn find_integrations(
        &self,
        user_id: &UserId,
        filter: &IntegrationFilter,
    ) -> Result<Vec<Integration>>;

    /// Apply a partial update to one integration and return the new state
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the integration does not exist for
    /// the user, or another error if the update fails.
    async fn update_integration(
        &self,
        id: &IntegrationId,
        update: IntegrationUpdate,
        user_id: &UserId,
    ) -> Result<Integration>;
}
