//! Logs command - print or tail the log of one step.

use super::view::TerminalView;
use anyhow::{Context, Result};
use pipedeck_client::StepName;
use pipedeck_panel::{LogTailer, PanelConfig};
use std::sync::Arc;

/// Run the logs command.
pub async fn run(config: &PanelConfig, step: &str, follow: bool) -> Result<()> {
    let step = StepName::new(step);
    let client = super::connect(config)?;

    if !follow {
        let text = client
            .get_logs(&step)
            .await
            .with_context(|| format!("Failed to fetch logs for '{step}'"))?;
        if text.is_empty() {
            println!("No log output for {step} yet.");
        } else {
            print!("{text}");
        }
        return Ok(());
    }

    tracing::info!(
        step = %step,
        period_ms = config.log_interval().as_millis() as u64,
        "Following log"
    );

    let tailer = LogTailer::new(
        Arc::new(client),
        Arc::new(TerminalView::for_step(step.clone())),
        config.log_interval(),
    );
    tailer.start_tail(step);
    println!("Following log (Ctrl+C to stop)...");

    super::interrupted().await?;
    tailer.stop_tail();
    Ok(())
}
