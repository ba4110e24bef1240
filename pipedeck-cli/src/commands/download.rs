//! Download command - save an artifact produced by the pipeline.

use anyhow::{Context, Result};
use pipedeck_panel::PanelConfig;
use std::path::{Path, PathBuf};

/// Local path for a downloaded file when `-o` is not given.
///
/// Only the last path component of the remote name is used, so a name like
/// `../x` cannot escape the working directory.
pub fn default_output(file: &str) -> Result<PathBuf> {
    Path::new(file)
        .file_name()
        .map(PathBuf::from)
        .with_context(|| format!("Cannot derive a local file name from '{file}'"))
}

/// Run the download command.
pub async fn run(config: &PanelConfig, file: &str, output: Option<PathBuf>) -> Result<()> {
    let output = match output {
        Some(path) => path,
        None => default_output(file)?,
    };

    let client = super::connect(config)?;
    let bytes = client
        .download_file(file)
        .await
        .with_context(|| format!("Failed to download '{file}'"))?;

    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(file, bytes = bytes.len(), path = %output.display(), "Downloaded file");
    println!("Saved {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_uses_file_name() {
        assert_eq!(
            default_output("ORM_26.1.0.zip").unwrap(),
            PathBuf::from("ORM_26.1.0.zip")
        );
        assert_eq!(
            default_output("reports/security.pdf").unwrap(),
            PathBuf::from("security.pdf")
        );
    }

    #[test]
    fn test_default_output_rejects_parent_dir() {
        assert!(default_output("..").is_err());
    }
}
