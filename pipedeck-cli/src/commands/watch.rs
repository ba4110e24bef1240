//! Watch command - live dashboard of step indicators.

use super::view::TerminalView;
use anyhow::Result;
use pipedeck_panel::{ControlPanel, PanelConfig};
use std::sync::Arc;

/// Run the watch command.
///
/// Prints a line whenever a step's indicator changes, and the log of `log`
/// as it grows, until Ctrl+C.
pub async fn run(config: &PanelConfig, log: Option<&str>) -> Result<()> {
    println!("Watching {} (Ctrl+C to stop)...", config.base_url());
    println!();

    let panel = ControlPanel::connect(config, Arc::new(TerminalView::all()))?;
    if let Some(step) = log {
        panel.open_log(step);
    }

    super::interrupted().await?;
    panel.close_log();

    let statuses = panel.statuses();
    tracing::info!(steps = statuses.len(), "Stopped watching");
    Ok(())
}
