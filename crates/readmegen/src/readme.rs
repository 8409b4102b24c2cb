//! README generation for one package: load, fetch sub-packages, render, write.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{Level, debug, enabled, info};

use crate::config::RenderConfig;
use crate::error::{DocsError, FetchErrors, Result};
use crate::fetcher::{FetchOptions, SubPackageFetcher};
use crate::generators::document::build_document;
use crate::generators::json::data_json;
use crate::generators::markdown::render_markdown;
use crate::markdown::MarkdownOptions;
use crate::model::{Package, SubPackage};
use crate::normalize::NewlineLimiter;
use crate::source::PackageSource;

const COMMAND_DOC_PREFIX: &str = "Package main is ";

/// Everything a README is rendered from.
#[derive(Debug, Serialize)]
pub struct ReadmeData {
    pub package: Package,
    pub sub_packages: Vec<SubPackage>,
    pub config: RenderConfig,
    /// Sub-package fetches that failed. The README is still rendered.
    #[serde(skip)]
    pub fetch_errors: FetchErrors,
}

/// Result of [`ReadmeGenerator::create`].
#[derive(Debug)]
pub struct ReadmeReport {
    /// Bytes written after newline normalization.
    pub bytes_written: usize,
    /// Sub-packages that could not be fetched, if any.
    pub fetch_errors: Option<FetchErrors>,
}

/// Generates README files from a [`PackageSource`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use readmegen::{ManifestSource, ReadmeGenerator, RenderConfig};
///
/// # async fn run() -> readmegen::Result<()> {
/// let source = Arc::new(ManifestSource::from_path("packages.json")?);
/// let generator = ReadmeGenerator::new(source)
///     .with_config(RenderConfig::new().with_functions());
///
/// let mut out = Vec::new();
/// let report = generator.create("github.com/user/project", &mut out).await?;
/// assert!(report.fetch_errors.is_none());
/// # Ok(())
/// # }
/// ```
pub struct ReadmeGenerator {
    source: Arc<dyn PackageSource>,
    config: RenderConfig,
    fetch_timeout: Option<Duration>,
    max_depth: Option<usize>,
}

impl ReadmeGenerator {
    pub fn new(source: Arc<dyn PackageSource>) -> Self {
        Self {
            source,
            config: RenderConfig::default(),
            fetch_timeout: None,
            max_depth: None,
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Bounds the time spent fetching sub-packages.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Bounds the number of sub-package levels fetched recursively.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Loads the package and its sub-packages.
    pub async fn load(&self, import_path: &str) -> Result<ReadmeData> {
        info!("Getting {}", import_path);
        let mut package = self.source.get(import_path).await?;
        if !package.is_documentable() {
            return Err(DocsError::PackageNotFound {
                import_path: import_path.to_string(),
            });
        }
        prepare(&mut package, import_path, &self.config);

        let (sub_packages, fetch_errors) = if self.config.skip_sub_packages {
            (Vec::new(), FetchErrors::default())
        } else {
            let outcome = SubPackageFetcher::new(Arc::clone(&self.source), import_path)
                .with_options(self.fetch_options())
                .fetch(&package.subdirectories)
                .await;
            (outcome.packages, outcome.errors)
        };

        Ok(ReadmeData {
            package,
            sub_packages,
            config: self.config.clone(),
            fetch_errors,
        })
    }

    /// Renders the README of `import_path` into a string.
    pub async fn render(&self, import_path: &str) -> Result<(String, ReadmeData)> {
        let data = self.load(import_path).await?;
        let markdown = render_data(&data)?;
        Ok((markdown, data))
    }

    /// Renders the README of `import_path` and writes it to `out`.
    ///
    /// Nothing is written unless rendering succeeds. Sub-package fetch
    /// failures do not fail the call; they are returned in the report.
    pub async fn create<W: Write>(&self, import_path: &str, mut out: W) -> Result<ReadmeReport> {
        let (markdown, data) = self.render(import_path).await?;
        out.write_all(markdown.as_bytes()).map_err(DocsError::Write)?;
        out.flush().map_err(DocsError::Write)?;

        Ok(ReadmeReport {
            bytes_written: markdown.len(),
            fetch_errors: data.fetch_errors.into_option(),
        })
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            recursive: self.config.recursive_sub_packages,
            max_depth: self.max_depth,
            max_parallel: None,
            deadline: self.fetch_timeout.map(|timeout| Instant::now() + timeout),
        }
    }
}

/// Renders prepared package data to normalized Markdown.
pub fn render_data(data: &ReadmeData) -> Result<String> {
    if enabled!(Level::DEBUG) {
        match data_json(data) {
            Ok(dump) => debug!("Rendering README from data:\n{}", dump),
            Err(error) => debug!("Failed dumping README data: {}", error),
        }
    }

    let options = MarkdownOptions::default().with_diff_blocks(!data.config.no_diff_blocks);
    let document = build_document(data);
    let raw = render_markdown(&document, &options);

    let mut limiter = NewlineLimiter::new(Vec::with_capacity(raw.len()));
    limiter.write_all(raw.as_bytes()).map_err(DocsError::Write)?;
    String::from_utf8(limiter.into_inner()).map_err(|error| DocsError::Other {
        message: format!("rendered README is not valid UTF-8: {error}"),
    })
}

/// Applies configuration and package-kind adjustments before rendering.
fn prepare(package: &mut Package, import_path: &str, config: &RenderConfig) {
    package.subdirectories.sort();

    if !config.import_path.is_empty() {
        package.import_path = config.import_path.clone();
    } else if package.import_path.is_empty() {
        package.import_path = import_path.to_string();
    }

    if package.is_command {
        let base = import_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if !base.is_empty() && base != "." {
            package.name = base.to_string();
        } else if !package.project_name.is_empty() {
            package.name = package.project_name.clone();
        }
        if let Some(doc) = package.doc.strip_prefix(COMMAND_DOC_PREFIX) {
            package.doc = doc.to_string();
        }
        debug!("Treating {} as command {}", import_path, package.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_sorts_subdirectories_and_overrides_import_path() {
        let mut package = Package::new("pkg", "example.com/pkg");
        package.subdirectories = vec!["b".into(), "a".into()];
        let config = RenderConfig::new().with_import_path("example.com/pkg/v2");

        prepare(&mut package, "example.com/pkg", &config);
        assert_eq!(package.subdirectories, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(package.import_path, "example.com/pkg/v2");
    }

    #[test]
    fn prepare_names_commands_after_their_directory() {
        let mut package = Package::new("main", "example.com/tools/cmd/mytool");
        package.is_command = true;
        package.doc = "Package main is a tool that does things.".to_string();

        prepare(&mut package, "example.com/tools/cmd/mytool", &RenderConfig::default());
        assert_eq!(package.name, "mytool");
        assert_eq!(package.doc, "a tool that does things.");
    }
}
