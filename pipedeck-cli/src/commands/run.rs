//! Run command - trigger a step and follow it to completion.

use super::view::TerminalView;
use anyhow::{Context, Result};
use pipedeck_client::{StepName, StepPayload, StepStatus};
use pipedeck_panel::{ControlPanel, PanelConfig, SchemaRegistry};
use std::sync::Arc;
use std::time::Duration;

/// How often the run command checks the step's status on the board.
const CHECK_INTERVAL: Duration = Duration::from_millis(250);

/// Parse a `key=value` payload field.
pub fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("field name missing in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Tracks a triggered step until it has run and finished.
///
/// Only replies to polls issued after the trigger was acknowledged count. A
/// terminal status ends the run once RUNNING has been seen, or right away if
/// it differs from the status the step had before the trigger. A step that
/// finishes between two polls never shows RUNNING.
#[derive(Debug)]
struct Completion {
    /// Status of the step before the trigger was sent.
    before: Option<StepStatus>,
    /// Last poll sequence number issued when the ack arrived.
    acked_at: u64,
    seen_running: bool,
}

impl Completion {
    fn new(before: Option<StepStatus>, acked_at: u64) -> Self {
        Self {
            before,
            acked_at,
            seen_running: false,
        }
    }

    /// Feed the latest status and the sequence number of the reply it came
    /// from. Returns the final status once the step is done.
    fn observe(&mut self, seq: u64, status: Option<StepStatus>) -> Option<StepStatus> {
        if seq <= self.acked_at {
            return None;
        }
        match status {
            Some(StepStatus::Running) => {
                self.seen_running = true;
                None
            }
            Some(status)
                if status.is_terminal() && (self.seen_running || Some(status) != self.before) =>
            {
                Some(status)
            }
            _ => None,
        }
    }
}

/// Run the run command.
pub async fn run(
    config: &PanelConfig,
    step: &str,
    fields: Vec<(String, String)>,
    follow: bool,
) -> Result<()> {
    let step = StepName::new(step);
    if !step.is_known() {
        tracing::warn!(step = %step, "Step is not one of the built-in steps");
    }
    let payload: StepPayload = fields.into_iter().collect();

    tracing::info!(
        step = %step,
        fields = payload.len(),
        url = %config.base_url(),
        "Triggering step"
    );

    SchemaRegistry::builtin().validate(&step, &payload)?;

    if !follow {
        let client = super::connect(config)?;
        let ack = client
            .trigger_step(&step, &payload)
            .await
            .with_context(|| format!("Failed to trigger '{step}'"))?;
        match ack.message {
            Some(message) => println!("Triggered {step}: {message}"),
            None => println!("Triggered {step} (HTTP {})", ack.status),
        }
        return Ok(());
    }

    let client = super::connect(config)?;
    // Status before the trigger tells a finished run from a leftover one.
    let before = match client.get_status().await {
        Ok(snapshot) => snapshot.get(&step),
        Err(err) => {
            tracing::debug!(
                step = %step,
                error = %err,
                "Could not read status before trigger"
            );
            None
        }
    };

    let view = Arc::new(TerminalView::for_step(step.clone()));
    let panel = ControlPanel::start(Arc::new(client), view, config);
    panel
        .trigger(step.clone(), payload)?
        .await
        .context("Dispatch task failed")?
        .with_context(|| format!("Failed to trigger '{step}'"))?;

    let mut completion = Completion::new(before, panel.board().issued_seq());
    let mut ticker = tokio::time::interval(CHECK_INTERVAL);
    let interrupted = super::interrupted();
    tokio::pin!(interrupted);

    let status = loop {
        tokio::select! {
            result = &mut interrupted => {
                result?;
                panel.close_log();
                println!();
                println!("Stopped following {step}; the step keeps running on the backend.");
                return Ok(());
            }
            _ = ticker.tick() => {
                let (seq, current) = panel.board().status_at(&step);
                if let Some(status) = completion.observe(seq, current) {
                    break status;
                }
            }
        }
    };

    // One more fetch picks up the final lines.
    tokio::time::sleep(config.log_interval()).await;
    panel.close_log();

    println!();
    match status {
        StepStatus::Failed => anyhow::bail!("Step '{step}' failed"),
        _ => {
            println!("Step '{step}' finished: {status}");
            Ok(())
        }
    }
}
