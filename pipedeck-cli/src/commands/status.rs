//! Status command - show every step's indicator once.

use super::view::indicator_line;
use anyhow::{Context, Result};
use pipedeck_client::{StatusSnapshot, StepName, StepStatus};
use pipedeck_panel::{Indicator, PanelConfig};

/// Dashboard lines: built-in steps in pipeline order, then any other step the
/// backend reported. Built-in steps missing from the reply show as idle.
pub fn status_lines(snapshot: &StatusSnapshot) -> Vec<String> {
    let mut lines: Vec<String> = StepName::known()
        .map(|step| {
            let status = snapshot.get(&step).unwrap_or(StepStatus::Unknown);
            indicator_line(&step, Indicator::from(status))
        })
        .collect();

    lines.extend(
        snapshot
            .iter()
            .filter(|(step, _)| !step.is_known())
            .map(|(step, status)| indicator_line(step, Indicator::from(status))),
    );
    lines
}

/// Run the status command.
pub async fn run(config: &PanelConfig) -> Result<()> {
    let client = super::connect(config)?;
    let snapshot = client
        .get_status()
        .await
        .with_context(|| format!("Failed to fetch status from {}", config.base_url()))?;

    tracing::debug!(steps = snapshot.len(), "Fetched status");

    println!("Pipeline Status");
    println!("===============");
    println!();
    for line in status_lines(&snapshot) {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_steps_listed_in_order() {
        let snapshot: StatusSnapshot = [
            (StepName::new("zip"), StepStatus::Success),
            (StepName::new("commit"), StepStatus::Running),
        ]
        .into_iter()
        .collect();

        let lines = status_lines(&snapshot);
        assert_eq!(lines.len(), StepName::KNOWN.len());
        assert_eq!(
            lines[0],
            indicator_line(&"commit".into(), Indicator::InProgress)
        );
        assert_eq!(lines[1], indicator_line(&"report".into(), Indicator::Idle));
        assert_eq!(lines[6], indicator_line(&"zip".into(), Indicator::Ok));
    }

    #[test]
    fn test_extra_steps_appended() {
        let snapshot: StatusSnapshot = [(StepName::new("notarize"), StepStatus::Failed)]
            .into_iter()
            .collect();

        let lines = status_lines(&snapshot);
        assert_eq!(lines.len(), StepName::KNOWN.len() + 1);
        assert_eq!(
            lines.last().unwrap(),
            &indicator_line(&"notarize".into(), Indicator::Error)
        );
    }
}
