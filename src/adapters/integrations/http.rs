//! HTTP helpers shared by the export clients

use crate::domain::{FerryError, IntegrationError, Result};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

/// Build an HTTP client with the integration's request timeout
pub(crate) fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(timeout_seconds.min(30)))
        .user_agent(concat!("ferry/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FerryError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Classify a non-success response
///
/// 4xx means the integration refused the export (`Ok(false)`); 5xx is a
/// fault on the integration's side and is returned as an error.
pub(crate) async fn refused_or_fault(integration: &str, response: Response) -> Result<bool> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status.is_server_error() {
        return Err(IntegrationError::ServerError {
            integration: integration.to_string(),
            status: status.as_u16(),
            message: truncate(&body, 512),
        }
        .into());
    }

    tracing::warn!(
        integration = integration,
        status = status.as_u16(),
        body = %truncate(&body, 512),
        "Integration refused export"
    );
    Ok(false)
}

/// Delay in milliseconds requested by a `Retry-After` header (given in seconds)
pub(crate) fn retry_after_ms(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(5).is_ok());
    }

    #[tokio::test]
    async fn test_retry_after_is_converted_to_millis() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/limited")
            .with_status(429)
            .with_header("retry-after", "3")
            .create_async()
            .await;
        server
            .mock("GET", "/dated")
            .with_status(429)
            .with_header("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")
            .create_async()
            .await;

        let client = build_http_client(5).unwrap();
        let limited = client
            .get(format!("{}/limited", server.url()))
            .send()
            .await
            .unwrap();
        let dated = client
            .get(format!("{}/dated", server.url()))
            .send()
            .await
            .unwrap();

        assert_eq!(retry_after_ms(&limited), Some(3000));
        assert_eq!(retry_after_ms(&dated), None);
    }
}
