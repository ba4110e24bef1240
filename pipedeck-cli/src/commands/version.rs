//! Version command - show version information.

use anyhow::Result;
use pipedeck_panel::PanelConfig;

/// Version information.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command.
pub fn run(config: &PanelConfig) -> Result<()> {
    println!("pipedeck - release pipeline control panel");
    println!();
    println!("Version:     {}", VERSION);
    println!(
        "Platform:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!("Backend:     {}", config.base_url());
    println!(
        "Polling:     status every {} ms, logs every {} ms",
        config.status_interval().as_millis(),
        config.log_interval().as_millis()
    );
    println!();
    println!("Components:");
    println!("  pipedeck-client  HTTP client for the pipeline backend");
    println!("  pipedeck-panel   Dispatcher, status poller, log tailer");
    println!("  pipedeck-cli     Command-line interface");

    Ok(())
}
