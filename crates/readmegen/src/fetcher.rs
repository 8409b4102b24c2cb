//! Concurrent retrieval of sub-packages.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{DocsError, FetchError, FetchErrors, Result};
use crate::model::{Package, SubPackage};
use crate::source::PackageSource;

/// Controls how far and how fast sub-packages are fetched.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Descend into the subdirectories of fetched packages.
    pub recursive: bool,
    /// Number of directory levels to fetch when recursive. `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Maximum number of fetches in flight. `None` is unbounded.
    pub max_parallel: Option<usize>,
    /// Fetches still pending at this instant fail with [`DocsError::Timeout`].
    pub deadline: Option<Instant>,
}

impl FetchOptions {
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = Some(max_parallel.max(1));
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Packages found under a root package, plus every failed fetch.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Documentable sub-packages, sorted by relative path.
    pub packages: Vec<SubPackage>,
    /// Failed fetches, sorted by import path.
    pub errors: FetchErrors,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with the aggregated errors if any fetch failed.
    pub fn into_result(self) -> Result<Vec<SubPackage>> {
        match self.errors.into_option() {
            Some(errors) => Err(errors.into()),
            None => Ok(self.packages),
        }
    }
}

/// Fetches the sub-packages of one root package.
///
/// Every directory of a level is fetched concurrently. A failed fetch does not
/// cancel its siblings. Directories that hold no package are skipped, but
/// their own subdirectories are still visited when fetching recursively.
pub struct SubPackageFetcher {
    source: Arc<dyn PackageSource>,
    import_path: String,
    options: FetchOptions,
}

impl SubPackageFetcher {
    pub fn new(source: Arc<dyn PackageSource>, import_path: impl Into<String>) -> Self {
        Self {
            source,
            import_path: import_path.into(),
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetches `subdirs`, given relative to the root import path.
    pub async fn fetch(&self, subdirs: &[String]) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();
        let semaphore = self.options.max_parallel.map(|n| Arc::new(Semaphore::new(n)));

        let mut level: Vec<String> = subdirs.to_vec();
        let mut depth = 0usize;
        while !level.is_empty() {
            let descend = self.options.recursive
                && self.options.max_depth.is_none_or(|max| depth + 1 < max);

            let mut join_set = JoinSet::new();
            let mut in_flight: HashMap<Id, String> = HashMap::new();
            for rel in level.drain(..) {
                let source = Arc::clone(&self.source);
                let import_path = format!("{}/{}", self.import_path, rel);
                let deadline = self.options.deadline;
                let semaphore = semaphore.clone();

                let task_path = import_path.clone();
                let handle = join_set.spawn(async move {
                    let _permit = match semaphore {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    let result = fetch_one(source.as_ref(), &import_path, deadline).await;
                    (rel, import_path, result)
                });
                in_flight.insert(handle.id(), task_path);
            }

            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((rel, import_path, Ok(package))) => {
                        if descend {
                            level.extend(
                                package
                                    .subdirectories
                                    .iter()
                                    .map(|child| format!("{rel}/{child}")),
                            );
                        }
                        if package.is_documentable() {
                            outcome.packages.push(SubPackage { path: rel, package });
                        } else {
                            debug!("Skipping {}: not a package", import_path);
                        }
                    }
                    Ok((_, import_path, Err(error))) => {
                        warn!("Failed getting {}: {}", import_path, error);
                        outcome.errors.push(FetchError::new(import_path, error));
                    }
                    Err(join_err) => {
                        let import_path = in_flight
                            .remove(&join_err.id())
                            .unwrap_or_else(|| "unknown".to_string());
                        let error = DocsError::Other {
                            message: format!("fetch task panicked: {join_err}"),
                        };
                        outcome.errors.push(FetchError::new(import_path, error));
                    }
                }
            }

            depth += 1;
        }

        outcome.packages.sort_by(|a, b| a.path.cmp(&b.path));
        outcome.errors.sort();
        outcome
    }
}

async fn fetch_one(
    source: &dyn PackageSource,
    import_path: &str,
    deadline: Option<Instant>,
) -> Result<Package> {
    info!("Getting {}", import_path);
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, source.get(import_path))
            .await
            .map_err(|_| DocsError::Timeout {
                import_path: import_path.to_string(),
            })?,
        None => source.get(import_path).await,
    }
}
