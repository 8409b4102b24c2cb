use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for readme generation operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Error variants for package loading, sub-package fetching and rendering.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to read or write a file.
    #[error("failed to access '{path}': {error}")]
    Io {
        /// Path of the file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The render configuration is not valid JSON for [`crate::RenderConfig`].
    #[error("invalid render configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// A package manifest could not be parsed.
    #[error("invalid package manifest '{path}': {message}")]
    InvalidManifest {
        /// Path to the manifest.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// The package source has no package for this import path.
    #[error("package '{import_path}' not found")]
    PackageNotFound {
        /// Import path that was requested.
        import_path: String,
    },

    /// The fetch deadline expired before the package source answered.
    #[error("fetching '{import_path}' timed out")]
    Timeout {
        /// Import path that was requested.
        import_path: String,
    },

    /// One or more sub-package fetches failed.
    #[error(transparent)]
    SubPackages(#[from] FetchErrors),

    /// Writing the rendered document failed.
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    /// Generic error variant.
    #[error("{message}")]
    Other {
        /// Human-readable error message.
        message: String,
    },
}

impl DocsError {
    /// Helper to create a manifest error from a parser error.
    pub fn invalid_manifest(path: impl Into<PathBuf>, error: impl fmt::Display) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

/// Failure to fetch a single sub-package.
#[derive(Debug, Error)]
#[error("failed getting {import_path}: {source}")]
pub struct FetchError {
    /// Full import path of the sub-package.
    pub import_path: String,
    /// Why the fetch failed.
    #[source]
    pub source: Box<DocsError>,
}

impl FetchError {
    pub fn new(import_path: impl Into<String>, source: DocsError) -> Self {
        Self {
            import_path: import_path.into(),
            source: Box::new(source),
        }
    }
}

/// Aggregated sub-package fetch failures.
///
/// Sibling fetches keep running when one of them fails, so every failure of a
/// fetch run is collected here.
#[derive(Debug, Default)]
pub struct FetchErrors {
    errors: Vec<FetchError>,
}

impl FetchErrors {
    pub fn push(&mut self, error: FetchError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FetchError> {
        self.errors.iter()
    }

    /// Sorts the collected errors by import path so messages are stable.
    pub(crate) fn sort(&mut self) {
        self.errors
            .sort_by(|a, b| a.import_path.cmp(&b.import_path));
    }

    /// Returns `None` when nothing failed.
    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }
}

impl fmt::Display for FetchErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no errors occurred"),
            [single] => write!(f, "1 error occurred:\n\t* {single}"),
            errors => {
                write!(f, "{} errors occurred:", errors.len())?;
                for error in errors {
                    write!(f, "\n\t* {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FetchErrors {}

impl IntoIterator for FetchErrors {
    type Item = FetchError;
    type IntoIter = std::vec::IntoIter<FetchError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl Extend<FetchError> for FetchErrors {
    fn extend<T: IntoIterator<Item = FetchError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}
