//! Readwise export client
//!
//! Readwise only stores highlights, so each library item is flattened into
//! one Readwise highlight per quoted highlight it carries. Items without
//! quoted highlights contribute nothing, and a batch with nothing to send is
//! reported as synced without contacting Readwise.

use super::http::{build_http_client, refused_or_fault, retry_after_ms};
use super::IntegrationClient;
use crate::config::{ReadwiseConfig, SecretString};
use crate::domain::{Highlight, IntegrationError, LibraryItem, Result};
use crate::log_retry_attempt;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;

/// Registry name of the Readwise client
pub const READWISE: &str = "READWISE";

/// A highlight in the shape the Readwise v2 API expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadwiseHighlight {
    pub text: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub highlight_url: String,
    pub highlighted_at: String,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub location_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub source_type: &'static str,
    pub source_url: String,
}

#[derive(Debug, Serialize)]
struct HighlightsPayload<'a> {
    highlights: &'a [ReadwiseHighlight],
}

/// Readwise client
pub struct ReadwiseClient {
    client: Client,
    config: ReadwiseConfig,
}

impl ReadwiseClient {
    /// Create a new Readwise client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ReadwiseConfig) -> Result<Self> {
        let client = build_http_client(config.timeout_seconds)?;
        Ok(Self { client, config })
    }

    /// Convert an item's quoted highlights into Readwise highlights
    pub fn item_to_highlights(&self, item: &LibraryItem) -> Vec<ReadwiseHighlight> {
        let category = if item.site_name.as_deref() == Some("Twitter") {
            "tweets"
        } else {
            "articles"
        };

        item.highlights
            .iter()
            .filter(|h| h.is_quoted_highlight())
            .map(|h| ReadwiseHighlight {
                text: h.quote.clone().unwrap_or_default(),
                title: item.title.clone(),
                author: non_blank(item.author.as_deref()),
                highlight_url: self.highlight_url(item, h),
                highlighted_at: h.created_at.to_rfc3339(),
                category,
                image_url: non_blank(item.thumbnail.as_deref()),
                location_type: "order",
                note: non_blank(h.annotation.as_deref()),
                source_type: "omnivore",
                source_url: item.original_url.clone(),
            })
            .collect()
    }

    fn highlight_url(&self, item: &LibraryItem, highlight: &Highlight) -> String {
        format!(
            "{}/me/{}#{}",
            self.config.highlight_base_url.trim_end_matches('/'),
            item.id,
            highlight.id
        )
    }

    fn highlights_url(&self) -> String {
        format!("{}/highlights/", self.config.base_url.trim_end_matches('/'))
    }

    /// Post highlights, retrying while Readwise rate-limits the request
    async fn sync_highlights(
        &self,
        token: &SecretString,
        highlights: &[ReadwiseHighlight],
    ) -> Result<bool> {
        let url = self.highlights_url();
        let auth = format!("Token {}", token.expose_secret().as_ref());
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            let response = self
                .client
                .post(&url)
                .header(AUTHORIZATION, &auth)
                .json(&HighlightsPayload { highlights })
                .send()
                .await
                .map_err(|e| IntegrationError::from_transport(READWISE, &e))?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && attempt < max_retries {
                attempt += 1;
                let delay_ms = retry_after_ms(&response)
                    .unwrap_or_else(|| self.config.retry.delay_for_attempt(attempt))
                    .min(self.config.retry.max_delay_ms);

                log_retry_attempt!(attempt, max_retries, "Readwise rate limit");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                continue;
            }

            if status.is_success() {
                tracing::debug!(
                    count = highlights.len(),
                    status = status.as_u16(),
                    "Readwise accepted highlights"
                );
                return Ok(true);
            }

            return refused_or_fault(READWISE, response).await;
        }
    }
}

#[async_trait]
impl IntegrationClient for ReadwiseClient {
    fn name(&self) -> &str {
        READWISE
    }

    async fn export(&self, token: &SecretString, items: &[LibraryItem]) -> Result<bool> {
        let highlights: Vec<ReadwiseHighlight> = items
            .iter()
            .flat_map(|item| self.item_to_highlights(item))
            .collect();

        if highlights.is_empty() {
            tracing::debug!(
                items = items.len(),
                "No highlights to export to Readwise"
            );
            return Ok(true);
        }

        self.sync_highlights(token, &highlights).await
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
