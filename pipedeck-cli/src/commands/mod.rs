//! CLI command implementations.

pub mod download;
pub mod files;
pub mod logs;
pub mod run;
pub mod status;
pub mod steps;
pub mod version;
pub mod view;
pub mod watch;

use anyhow::{Context, Result};
use pipedeck_client::Client;
use pipedeck_panel::PanelConfig;

/// Panel configuration from the environment, with `--url` taking precedence.
pub fn resolve_config(url: Option<&str>) -> PanelConfig {
    let config = PanelConfig::from_env();
    match url {
        Some(url) => config.to_builder().base_url(url).build(),
        None => config,
    }
}

/// HTTP client for one-shot commands.
pub fn connect(config: &PanelConfig) -> Result<Client> {
    Client::new(config.base_url())
        .and_then(|client| client.with_timeout(config.request_timeout()))
        .with_context(|| format!("Failed to create client for {}", config.base_url()))
}

/// Resolve once Ctrl+C is pressed.
pub async fn interrupted() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")
}
