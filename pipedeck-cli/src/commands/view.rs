//! Terminal rendering of panel state.

use parking_lot::Mutex;
use pipedeck_client::{RunAck, StepName};
use pipedeck_panel::{Indicator, PanelView};
use std::collections::BTreeMap;
use std::io::Write;

/// How new log text relates to what is already on screen.
#[derive(Debug, PartialEq, Eq)]
pub enum LogDelta<'a> {
    /// Text grew; print only the new tail.
    Append(&'a str),
    /// Text changed in place or was truncated; print it again in full.
    Replace(&'a str),
}

/// Compare freshly fetched log text against what was printed last.
///
/// Returns `None` when nothing changed.
pub fn log_delta<'a>(previous: Option<&str>, next: &'a str) -> Option<LogDelta<'a>> {
    match previous {
        Some(prev) if prev == next => None,
        Some(prev) if next.starts_with(prev) => Some(LogDelta::Append(&next[prev.len()..])),
        Some(_) => Some(LogDelta::Replace(next)),
        None if next.is_empty() => None,
        None => Some(LogDelta::Append(next)),
    }
}

/// One dashboard line for a step.
pub fn indicator_line(step: &StepName, indicator: Indicator) -> String {
    format!("{} {:<14}{}", indicator.marker(), step.as_str(), indicator.label())
}

#[derive(Default)]
struct TerminalState {
    indicators: BTreeMap<StepName, Indicator>,
    log: Option<String>,
}

/// Prints indicator changes and log output to stdout.
pub struct TerminalView {
    /// Only render indicators of this step, when set.
    only: Option<StepName>,
    state: Mutex<TerminalState>,
}

impl TerminalView {
    /// Render every step.
    pub fn all() -> Self {
        Self {
            only: None,
            state: Mutex::default(),
        }
    }

    /// Render the indicator of a single step.
    pub fn for_step(step: StepName) -> Self {
        Self {
            only: Some(step),
            state: Mutex::default(),
        }
    }
}

impl PanelView for TerminalView {
    fn show_indicator(&self, step: &StepName, indicator: Indicator) {
        if self.only.as_ref().is_some_and(|only| only != step) {
            return;
        }
        let mut state = self.state.lock();
        if state.indicators.insert(step.clone(), indicator) != Some(indicator) {
            println!("{}", indicator_line(step, indicator));
        }
    }

    fn open_log(&self, step: &StepName) {
        self.state.lock().log = None;
        println!("==> {step} log <==");
    }

    fn show_log(&self, _step: &StepName, text: &str) {
        let mut state = self.state.lock();
        let mut stdout = std::io::stdout().lock();
        let written = match log_delta(state.log.as_deref(), text) {
            None => return,
            Some(LogDelta::Append(tail)) => stdout.write_all(tail.as_bytes()),
            Some(LogDelta::Replace(full)) => writeln!(stdout, "--- log restarted ---")
                .and_then(|()| stdout.write_all(full.as_bytes())),
        };
        if let Err(err) = written.and_then(|()| stdout.flush()) {
            tracing::debug!(error = %err, "Failed to write log output");
        }
        state.log = Some(text.to_string());
    }

    fn close_log(&self) {
        self.state.lock().log = None;
    }

    fn dispatch_accepted(&self, step: &StepName, ack: &RunAck) {
        match &ack.message {
            Some(message) => println!("Triggered {step}: {message}"),
            None => println!("Triggered {step} (HTTP {})", ack.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growing_log_appends_tail() {
        assert_eq!(
            log_delta(Some("Connecting...\n"), "Connecting...\nConnected.\n"),
            Some(LogDelta::Append("Connected.\n"))
        );
    }

    #[test]
    fn test_unchanged_log_prints_nothing() {
        assert_eq!(log_delta(Some("same\n"), "same\n"), None);
        assert_eq!(log_delta(None, ""), None);
    }

    #[test]
    fn test_rewritten_log_is_replaced() {
        assert_eq!(
            log_delta(Some("run 1\nfailed\n"), "run 2\n"),
            Some(LogDelta::Replace("run 2\n"))
        );
    }

    #[test]
    fn test_first_fetch_prints_everything() {
        assert_eq!(log_delta(None, "packing\n"), Some(LogDelta::Append("packing\n")));
    }

    #[test]
    fn test_indicator_line_layout() {
        let line = indicator_line(&StepName::new("angular"), Indicator::InProgress);
        assert!(line.ends_with("angular       in progress"));
        assert!(line.starts_with(Indicator::InProgress.marker()));
    }
}
