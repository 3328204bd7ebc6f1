//! Clients command implementation
//!
//! Lists the export clients that the current configuration registers.

use super::load_command_config;
use crate::adapters::integrations::IntegrationClientRegistry;
use clap::Args;

/// Arguments for the clients command
#[derive(Args, Debug)]
pub struct ClientsArgs {}

impl ClientsArgs {
    /// Execute the clients command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_command_config(config_path) else {
            return Ok(2);
        };

        let registry = IntegrationClientRegistry::from_config(&config.integrations)?;
        if registry.is_empty() {
            println!("No export clients registered");
            return Ok(0);
        }

        println!("Registered export clients:");
        for name in registry.names() {
            println!("  - {name}");
        }
        Ok(0)
    }
}
