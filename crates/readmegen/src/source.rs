//! Package sources: where package documentation metadata comes from.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{DocsError, Result};
use crate::model::Package;

/// Supplies the documentation metadata of a package by import path.
///
/// Implementations are shared between concurrent fetch tasks.
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Loads the package at `import_path`.
    ///
    /// A directory that exists but holds no package should be returned as a
    /// package with an empty name rather than as an error.
    async fn get(&self, import_path: &str) -> Result<Package>;
}

/// Package source backed by a JSON manifest produced by a doc extractor.
///
/// The manifest maps import paths to packages:
///
/// ```json
/// {"packages": {"example.com/pkg": {"name": "pkg", "doc": "Package pkg ..."}}}
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManifestSource {
    packages: BTreeMap<String, Package>,
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    packages: BTreeMap<String, Package>,
}

impl ManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|error| DocsError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|error| DocsError::invalid_manifest(path, error))?;
        Ok(Self::from_packages(manifest.packages))
    }

    /// Parses a manifest document.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)
            .map_err(|error| DocsError::invalid_manifest("<inline>", error))?;
        Ok(Self::from_packages(manifest.packages))
    }

    fn from_packages(packages: BTreeMap<String, Package>) -> Self {
        let mut source = Self::new();
        for (import_path, package) in packages {
            source.insert(import_path, package);
        }
        source
    }

    /// Adds a package. An empty `import_path` on the package is filled in.
    pub fn insert(&mut self, import_path: impl Into<String>, mut package: Package) {
        let import_path = import_path.into();
        if package.import_path.is_empty() {
            package.import_path = import_path.clone();
        }
        self.packages.insert(import_path, package);
    }

    /// Builder form of [`ManifestSource::insert`].
    pub fn with_package(mut self, import_path: impl Into<String>, package: Package) -> Self {
        self.insert(import_path, package);
        self
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[async_trait]
impl PackageSource for ManifestSource {
    async fn get(&self, import_path: &str) -> Result<Package> {
        self.packages
            .get(import_path)
            .cloned()
            .ok_or_else(|| DocsError::PackageNotFound {
                import_path: import_path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_manifest_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("packages.json");
        fs::write(
            &path,
            r#"{"packages": {"example.com/root": {"name": "root", "subdirectories": ["a"]}}}"#,
        )
        .unwrap();

        let source = ManifestSource::from_path(&path).unwrap();
        assert_eq!(source.len(), 1);

        let package = source.get("example.com/root").await.unwrap();
        assert_eq!(package.name, "root");
        assert_eq!(package.import_path, "example.com/root");
        assert_eq!(package.subdirectories, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn unknown_import_path_is_an_error() {
        let source = ManifestSource::new();
        assert!(matches!(
            source.get("example.com/missing").await,
            Err(DocsError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn reports_manifest_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        assert!(matches!(
            ManifestSource::from_path(&missing),
            Err(DocsError::Io { .. })
        ));

        let broken = temp.path().join("broken.json");
        fs::write(&broken, "{\"packages\": [").unwrap();
        assert!(matches!(
            ManifestSource::from_path(&broken),
            Err(DocsError::InvalidManifest { .. })
        ));
    }
}
