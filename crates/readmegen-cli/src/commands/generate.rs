//! The README generation command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use readmegen::{FetchErrors, ManifestSource, ReadmeGenerator, render_data, render_json};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::cli::{Cli, OutputFormat};
use crate::config;
use crate::error::{CliError, Result, ResultExt};

/// Generates the README (or the JSON data dump) for `cli.import_path`.
pub async fn execute(cli: Cli) -> Result<()> {
    let base_dir = std::env::current_dir()?;
    let render_config = config::load(&cli.sections, &cli.badges, cli.config.as_deref(), &base_dir)?;
    debug!("Render configuration: {:?}", render_config);

    let source = ManifestSource::from_path(&cli.manifest).with_path(&cli.manifest)?;
    debug!(
        "Loaded {} packages from {}",
        source.len(),
        cli.manifest.display()
    );

    let mut generator = ReadmeGenerator::new(Arc::new(source)).with_config(render_config);
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(CliError::InvalidArgument(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        generator = generator.with_fetch_timeout(Duration::from_secs(secs));
    }

    let data = generator.load(&cli.import_path).await?;
    report_fetch_errors(&data.fetch_errors);

    let content = match cli.format {
        OutputFormat::Markdown => render_data(&data)?,
        OutputFormat::Json => render_json(&data)?,
    };

    match &cli.output {
        Some(path) => {
            write_atomic(path, content.as_bytes()).await?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

fn report_fetch_errors(errors: &FetchErrors) {
    if errors.is_empty() {
        return;
    }
    warn!(
        "{} sub-packages could not be fetched and are left out of the README",
        errors.len()
    );
    for error in errors.iter() {
        warn!("{}", error);
    }
}

/// Writes `content` to a sibling temp file and renames it over `path`.
async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp = temp_path(path)?;
    tokio::fs::write(&temp, content)
        .await
        .context(format!("Failed to write {}", temp.display()))?;
    if let Err(err) = tokio::fs::rename(&temp, path).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(err).context(format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        CliError::InvalidArgument(format!("output path {} has no file name", path.display()))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}
