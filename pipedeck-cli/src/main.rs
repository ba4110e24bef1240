//! pipedeck CLI - terminal control panel for the release pipeline.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pipedeck_panel::observability::{TracingConfig, TracingGuard, init_tracing};
use std::path::PathBuf;

/// pipedeck - trigger release steps and follow their progress.
#[derive(Parser)]
#[command(name = "pipedeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (defaults to PIPEDECK_URL, then http://localhost:8000)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger a step and follow its log until it finishes
    Run {
        /// Step to trigger (e.g. commit, angular, zip)
        step: String,

        /// Payload field as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_parser = commands::run::parse_field)]
        fields: Vec<(String, String)>,

        /// Return as soon as the backend acknowledges the trigger
        #[arg(long)]
        no_follow: bool,
    },

    /// Show the status of every step
    Status,

    /// Print the log of a step
    Logs {
        /// Step whose log to print
        step: String,

        /// Keep polling the log until Ctrl+C
        #[arg(short, long)]
        follow: bool,
    },

    /// Live dashboard of step indicators
    Watch {
        /// Also tail the log of this step
        #[arg(short, long)]
        log: Option<String>,
    },

    /// List known steps and their required fields
    Steps,

    /// List JSON inputs available for the report step
    Files,

    /// Download an artifact produced by the pipeline
    Download {
        /// File name on the backend
        file: String,

        /// Where to write it (defaults to the file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Filter used when neither `PIPEDECK_LOG_LEVEL` nor `RUST_LOG` is set.
fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn setup_logging(verbosity: u8) -> Result<TracingGuard> {
    // Panel output owns stdout.
    let config = TracingConfig::from_env_or(verbosity_filter(verbosity))
        .to_builder()
        .to_stderr(true)
        .build();

    init_tracing(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _tracing_guard = setup_logging(cli.verbose)?;
    let config = commands::resolve_config(cli.url.as_deref());

    match cli.command {
        Commands::Run {
            step,
            fields,
            no_follow,
        } => commands::run::run(&config, &step, fields, !no_follow).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Logs { step, follow } => commands::logs::run(&config, &step, follow).await,
        Commands::Watch { log } => commands::watch::run(&config, log.as_deref()).await,
        Commands::Steps => commands::steps::run(),
        Commands::Files => commands::files::run(&config).await,
        Commands::Download { file, output } => {
            commands::download::run(&config, &file, output).await
        }
        Commands::Version => commands::version::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter() {
        assert_eq!(verbosity_filter(0), "warn");
        assert_eq!(verbosity_filter(1), "info");
        assert_eq!(verbosity_filter(2), "debug");
        assert_eq!(verbosity_filter(7), "trace");
    }

    #[test]
    fn test_cli_parses_run_fields() {
        let cli = Cli::parse_from([
            "pipedeck", "-vv", "run", "zip", "-f", "note=fast", "--no-follow", "--url",
            "http://release-box:8000",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.url.as_deref(), Some("http://release-box:8000"));
        match cli.command {
            Commands::Run {
                step,
                fields,
                no_follow,
            } => {
                assert_eq!(step, "zip");
                assert_eq!(fields, vec![("note".to_string(), "fast".to_string())]);
                assert!(no_follow);
            }
            _ => panic!("Expected run command"),
        }
    }
}
