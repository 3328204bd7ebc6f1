//! Integration client registry
//!
//! Maps integration names to the client that serves them. Names are
//! matched case-insensitively, the way integrations are stored.

use super::{IntegrationClient, PocketClient, ReadwiseClient};
use crate::config::IntegrationsConfig;
use crate::domain::{FerryError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of export clients keyed by upper-case integration name
#[derive(Clone, Default)]
pub struct IntegrationClientRegistry {
    clients: BTreeMap<String, Arc<dyn IntegrationClient>>,
}

impl IntegrationClientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configuration
    ///
    /// Readwise is registered unless disabled; Pocket only when its section
    /// (and so a consumer key) is present.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be constructed.
    pub fn from_config(config: &IntegrationsConfig) -> Result<Self> {
        let mut registry = Self::new();

        if config.readwise.enabled {
            registry.register(Arc::new(ReadwiseClient::new(config.readwise.clone())?));
        }
        if let Some(ref pocket) = config.pocket {
            registry.register(Arc::new(PocketClient::new(pocket.clone())?));
        }

        tracing::debug!(clients = ?registry.names(), "Integration clients registered");
        Ok(registry)
    }

    /// Register a client under its own name, replacing any previous one
    pub fn register(&mut self, client: Arc<dyn IntegrationClient>) {
        self.clients.insert(client.name().to_uppercase(), client);
    }

    /// Resolve the client for an integration name
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::UnregisteredClient`] if no client serves the name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn IntegrationClient>> {
        self.clients
            .get(&name.to_uppercase())
            .cloned()
            .ok_or_else(|| FerryError::UnregisteredClient(name.to_string()))
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.clients.keys().map(String::as_str).collect()
    }

    /// True when no client is registered
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for IntegrationClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationClientRegistry")
            .field("clients", &self.names())
            .finish()
    }
}
