//! Files command - list JSON inputs for the report step.

use anyhow::{Context, Result};
use pipedeck_panel::PanelConfig;

/// Run the files command.
pub async fn run(config: &PanelConfig) -> Result<()> {
    let client = super::connect(config)?;
    let files = client
        .list_json_files()
        .await
        .context("Failed to list JSON files")?;

    if files.is_empty() {
        println!("No JSON files found.");
        return Ok(());
    }

    for file in &files {
        println!("{file}");
    }
    println!();
    println!("Use one with: pipedeck run report -f jsonFile=<NAME> ...");

    Ok(())
}
