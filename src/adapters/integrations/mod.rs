//! Export clients for third-party integrations

pub mod client;
mod http;
pub mod pocket;
pub mod readwise;
pub mod registry;

pub use client::IntegrationClient;
pub use pocket::{PocketClient, POCKET};
pub use readwise::{ReadwiseClient, ReadwiseHighlight, READWISE};
pub use registry::IntegrationClientRegistry;
