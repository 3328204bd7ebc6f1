//! In-memory store
//!
//! Backs both store traits with a snapshot held behind a lock. The CLI loads
//! it from a JSON file to run the export job locally, and tests use it
//! directly.

use super::traits::{IntegrationStore, LibraryItemStore};
use crate::domain::{
    FerryError, Integration, IntegrationFilter, IntegrationId, IntegrationUpdate, LibraryItem,
    LibraryItemId, Result, StoreError, UserId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::RwLock;

/// Serializable contents of an [`InMemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub library_items: Vec<LibraryItem>,

    #[serde(default)]
    pub integrations: Vec<Integration>,
}

/// Library item and integration store held in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreSnapshot>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Load a store from a JSON snapshot file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            FerryError::Io(format!("Failed to read store file {}: {}", path.display(), e))
        })?;
        let snapshot: StoreSnapshot = serde_json::from_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            library_items = snapshot.library_items.len(),
            integrations = snapshot.integrations.len(),
            "Loaded store snapshot"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the current contents to a JSON snapshot file
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.state.read().await)?;
        tokio::fs::write(path, json).await.map_err(|e| {
            FerryError::Io(format!(
                "Failed to write store file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Clone the current contents
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.read().await.clone()
    }

    /// Add a library item
    pub async fn insert_library_item(&self, item: LibraryItem) {
        self.state.write().await.library_items.push(item);
    }

    /// Add an integration, replacing any existing one with the same ID
    pub async fn insert_integration(&self, integration: Integration) {
        let mut state = self.state.write().await;
        state.integrations.retain(|i| i.id != integration.id);
        state.integrations.push(integration);
    }

    /// Look up one integration by ID regardless of owner
    pub async fn integration(&self, id: &IntegrationId) -> Option<Integration> {
        self.state
            .read()
            .await
            .integrations
            .iter()
            .find(|i| i.id == *id)
            .cloned()
    }
}

#[async_trait]
impl LibraryItemStore for InMemoryStore {
    async fn find_library_items_by_ids(
        &self,
        ids: &[LibraryItemId],
        user_id: &UserId,
    ) -> Result<Vec<LibraryItem>> {
        let state = self.state.read().await;
        let mut seen = HashSet::new();

        // Request order, one record per item like an `IN (...)` query
        let items = ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| {
                state
                    .library_items
                    .iter()
                    .find(|item| item.id == *id && item.user_id == *user_id)
                    .cloned()
            })
            .collect();

        Ok(items)
    }
}

#[async_trait]
impl IntegrationStore for InMemoryStore {
    async fn find_integrations(
        &self,
        user_id: &UserId,
        filter: &IntegrationFilter,
    ) -> Result<Vec<Integration>> {
        let state = self.state.read().await;
        Ok(state
            .integrations
            .iter()
            .filter(|i| i.user_id == *user_id && filter.matches(i))
            .cloned()
            .collect())
    }

    async fn update_integration(
        &self,
        id: &IntegrationId,
        update: IntegrationUpdate,
        user_id: &UserId,
    ) -> Result<Integration> {
        let mut state = self.state.write().await;
        let integration = state
            .integrations
            .iter_mut()
            .find(|i| i.id == *id && i.user_id == *user_id)
            .ok_or_else(|| StoreError::NotFound(format!("integration {id}")))?;

        update.apply_to(integration);
        Ok(integration.clone())
    }
}
