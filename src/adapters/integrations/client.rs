//! Export client trait definition
//!
//! Every supported third-party integration provides one implementation of
//! [`IntegrationClient`]. The dispatcher only sees this trait, resolved by
//! integration name through the registry.

use crate::config::SecretString;
use crate::domain::{LibraryItem, Result};
use async_trait::async_trait;

/// Capability that pushes library items to one integration's API
///
/// # Example
///
/// ```no_run
/// use ferry::adapters::integrations::{IntegrationClient, ReadwiseClient};
/// use ferry::config::{secret_string, ReadwiseConfig};
///
/// # async fn example() -> ferry::domain::Result<()> {
/// let client = ReadwiseClient::new(ReadwiseConfig::default())?;
/// let token = secret_string("readwise-token".to_string());
///
/// let synced = client.export(&token, &[]).await?;
/// assert!(synced);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait IntegrationClient: Send + Sync {
    /// Registry name of the integration, upper case (e.g. "READWISE")
    fn name(&self) -> &str;

    /// Export items using the user's credential
    ///
    /// Returns `Ok(true)` when the integration accepted the items and
    /// `Ok(false)` when it refused them (bad token, rejected payload).
    ///
    /// # Errors
    ///
    /// Returns an error for unexpected faults: network failures, timeouts,
    /// malformed responses.
    async fn export(&self, token: &SecretString, items: &[LibraryItem]) -> Result<bool>;
}
