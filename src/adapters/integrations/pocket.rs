//! Pocket export client
//!
//! Items are saved to the user's Pocket list through the batch `send`
//! endpoint, one `add` action per item.

use super::http::{build_http_client, refused_or_fault};
use super::IntegrationClient;
use crate::config::{PocketConfig, SecretString};
use crate::domain::{IntegrationError, LibraryItem, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Registry name of the Pocket client
pub const POCKET: &str = "POCKET";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    consumer_key: &'a str,
    access_token: &'a str,
    actions: Vec<AddAction<'a>>,
}

#[derive(Debug, Serialize)]
struct AddAction<'a> {
    action: &'static str,
    url: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
    time: i64,
}

impl<'a> AddAction<'a> {
    fn from_item(item: &'a LibraryItem) -> Self {
        let tags = (!item.labels.is_empty()).then(|| item.labels.join(","));
        Self {
            action: "add",
            url: &item.original_url,
            title: &item.title,
            tags,
            time: item.saved_at.timestamp(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    status: i64,
}

/// Pocket client
pub struct PocketClient {
    client: Client,
    config: PocketConfig,
}

impl PocketClient {
    /// Create a new Pocket client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PocketConfig) -> Result<Self> {
        let client = build_http_client(config.timeout_seconds)?;
        Ok(Self { client, config })
    }

    fn send_url(&self) -> String {
        format!("{}/v3/send", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IntegrationClient for PocketClient {
    fn name(&self) -> &str {
        POCKET
    }

    async fn export(&self, token: &SecretString, items: &[LibraryItem]) -> Result<bool> {
        if items.is_empty() {
            return Ok(true);
        }

        let request = SendRequest {
            consumer_key: self.config.consumer_key.expose_secret().as_ref(),
            access_token: token.expose_secret().as_ref(),
            actions: items.iter().map(AddAction::from_item).collect(),
        };

        let response = self
            .client
            .post(self.send_url())
            .header("X-Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| IntegrationError::from_transport(POCKET, &e))?;

        if !response.status().is_success() {
            return refused_or_fault(POCKET, response).await;
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| IntegrationError::from_transport(POCKET, &e))?;

        if body.status != 1 {
            tracing::warn!(status = body.status, "Pocket reported unsuccessful send");
        }
        Ok(body.status == 1)
    }
}
