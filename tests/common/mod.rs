//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferry::adapters::integrations::{IntegrationClient, IntegrationClientRegistry};
use ferry::adapters::store::{InMemoryStore, IntegrationStore, LibraryItemStore};
use ferry::config::{secret_string, SecretString};
use ferry::core::export::ExportDispatcher;
use ferry::domain::{
    Integration, IntegrationError, IntegrationFilter, IntegrationId, IntegrationType,
    IntegrationUpdate, LibraryItem, LibraryItemBuilder, LibraryItemId, Result, StoreError,
    UserId,
};
use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Log lines written while a capture guard is alive
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

/// One captured JSON log event
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: String,
    pub message: String,
    pub fields: serde_json::Value,
}

impl CapturedLogs {
    pub fn events(&self) -> Vec<LogEvent> {
        let buffer = self.0.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .map(|json| LogEvent {
                level: json["level"].as_str().unwrap_or_default().to_string(),
                message: json["fields"]["message"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
                fields: json["fields"].clone(),
            })
            .collect()
    }

    pub fn with_message(&self, message: &str) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }

    /// Events at INFO, WARN or ERROR
    pub fn visible(&self) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e.level.as_str(), "INFO" | "WARN" | "ERROR"))
            .collect()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}

/// Capture JSON logs on the current thread until the guard is dropped
///
/// Works with `#[tokio::test]`, whose runtime polls every future on the test
/// thread.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

pub enum Behavior {
    Accept,
    Refuse,
    Fail,
}

/// Export client with a fixed answer that counts its calls
pub struct FakeClient {
    name: &'static str,
    behavior: Behavior,
    calls: AtomicUsize,
    items_seen: Mutex<Vec<Vec<String>>>,
}

impl FakeClient {
    pub fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior,
            calls: AtomicUsize::new(0),
            items_seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Item IDs passed to each call
    pub fn items_seen(&self) -> Vec<Vec<String>> {
        self.items_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntegrationClient for FakeClient {
    fn name(&self) -> &str {
        self.name
    }

    async fn export(&self, _token: &SecretString, items: &[LibraryItem]) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.items_seen
            .lock()
            .unwrap()
            .push(items.iter().map(|i| i.id.to_string()).collect());

        match self.behavior {
            Behavior::Accept => Ok(true),
            Behavior::Refuse => Ok(false),
            Behavior::Fail => Err(IntegrationError::ConnectionFailed {
                integration: self.name.to_string(),
                message: "network unreachable".to_string(),
            }
            .into()),
        }
    }
}

/// Store wrapper counting integration store calls
pub struct CountingStore {
    pub inner: InMemoryStore,
    pub integration_lookups: AtomicUsize,
    pub updates: AtomicUsize,
    failing_updates: Mutex<HashSet<String>>,
}

impl CountingStore {
    pub fn new(inner: InMemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            integration_lookups: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            failing_updates: Mutex::new(HashSet::new()),
        })
    }

    /// Make `update_integration` fail for this integration
    pub fn fail_updates_for(&self, id: &str) {
        self.failing_updates.lock().unwrap().insert(id.to_string());
    }

    pub fn integration_lookups(&self) -> usize {
        self.integration_lookups.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LibraryItemStore for CountingStore {
    async fn find_library_items_by_ids(
        &self,
        ids: &[LibraryItemId],
        user_id: &UserId,
    ) -> Result<Vec<LibraryItem>> {
        self.inner.find_library_items_by_ids(ids, user_id).await
    }
}

#[async_trait]
impl IntegrationStore for CountingStore {
    async fn find_integrations(
        &self,
        user_id: &UserId,
        filter: &IntegrationFilter,
    ) -> Result<Vec<Integration>> {
        self.integration_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_integrations(user_id, filter).await
    }

    async fn update_integration(
        &self,
        id: &IntegrationId,
        update: IntegrationUpdate,
        user_id: &UserId,
    ) -> Result<Integration> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.failing_updates.lock().unwrap().contains(id.as_str()) {
            return Err(StoreError::UpdateFailed(format!("integration {id} is locked")).into());
        }
        self.inner.update_integration(id, update, user_id).await
    }
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn item_ids(ids: &[&str]) -> Vec<LibraryItemId> {
    ids.iter().map(|id| LibraryItemId::new(*id).unwrap()).collect()
}

pub fn integration_id(id: &str) -> IntegrationId {
    IntegrationId::new(id).unwrap()
}

pub fn library_item(id: &str, owner: &str) -> LibraryItem {
    LibraryItemBuilder::new()
        .id(LibraryItemId::new(id).unwrap())
        .user_id(user_id(owner))
        .title(format!("Article {id}"))
        .original_url(format!("https://example.com/articles/{id}"))
        .build()
        .unwrap()
}

pub fn integration(id: &str, owner: &str, name: &str) -> Integration {
    Integration {
        id: integration_id(id),
        user_id: user_id(owner),
        name: name.to_string(),
        token: secret_string(format!("{id}-token")),
        enabled: true,
        integration_type: IntegrationType::Export,
        synced_at: None,
    }
}

pub fn synced_integration(id: &str, owner: &str, name: &str, at: DateTime<Utc>) -> Integration {
    Integration {
        synced_at: Some(at),
        ..integration(id, owner, name)
    }
}

/// Store for user `u1` with items `i1`, `i2` and the given integrations
pub async fn seeded_store(integrations: Vec<Integration>) -> InMemoryStore {
    let store = InMemoryStore::new();
    store.insert_library_item(library_item("i1", "u1")).await;
    store.insert_library_item(library_item("i2", "u1")).await;
    store.insert_library_item(library_item("i3", "u2")).await;
    for integration in integrations {
        store.insert_integration(integration).await;
    }
    store
}

pub fn registry(clients: &[Arc<FakeClient>]) -> Arc<IntegrationClientRegistry> {
    let mut registry = IntegrationClientRegistry::new();
    for client in clients {
        registry.register(client.clone());
    }
    Arc::new(registry)
}

pub fn dispatcher(store: &Arc<CountingStore>, clients: &[Arc<FakeClient>]) -> ExportDispatcher {
    ExportDispatcher::new(store.clone(), store.clone(), registry(clients))
}
