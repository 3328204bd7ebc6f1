//! Export job request
//!
//! The queue hands the worker a camelCase JSON payload:
//!
//! ```json
//! { "userId": "u1", "libraryItemIds": ["i1", "i2"], "integrationId": "g1" }
//! ```

use super::ids::{IntegrationId, LibraryItemId, UserId};
use serde::{Deserialize, Serialize};

/// Input to one execution of the export-item job
///
/// Item IDs keep their order and are not deduplicated. When `integration_id`
/// is absent every enabled export integration of the user is targeted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJobRequest {
    pub user_id: UserId,

    #[serde(default)]
    pub library_item_ids: Vec<LibraryItemId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<IntegrationId>,
}

impl ExportJobRequest {
    /// Request targeting every enabled export integration of the user
    pub fn new(user_id: UserId, library_item_ids: Vec<LibraryItemId>) -> Self {
        Self {
            user_id,
            library_item_ids,
            integration_id: None,
        }
    }

    /// Narrow the request to a single integration
    pub fn with_integration(mut self, integration_id: IntegrationId) -> Self {
        self.integration_id = Some(integration_id);
        self
    }
}
