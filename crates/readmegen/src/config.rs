//! Configuration controlling which README sections are rendered.

use serde::{Deserialize, Serialize};

use crate::error::{DocsError, Result};

/// Options for one README render. Immutable for the duration of the render.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Overrides the README title. Defaults to the package name.
    pub title: String,

    /// Overrides the import path, e.g. `github.com/user/project/v2`.
    pub import_path: String,

    /// Adds constants documentation. With `types`, constants of each type are added too.
    pub consts: bool,

    /// Adds variables documentation. With `types`, variables of each type are added too.
    pub vars: bool,

    /// Adds functions documentation.
    pub functions: bool,

    /// Adds types documentation.
    pub types: bool,

    /// Adds functions returning a type under that type. Requires `types`.
    pub factories: bool,

    /// Adds the methods of a type under that type. Requires `types`.
    pub methods: bool,

    /// Omits the examples section.
    pub skip_examples: bool,

    /// Omits the sub packages section.
    pub skip_sub_packages: bool,

    /// Disables tagging code blocks as diffs when lines start with `+` or `-`.
    pub no_diff_blocks: bool,

    /// Retrieves sub-packages recursively instead of one level only.
    pub recursive_sub_packages: bool,

    /// Badges shown under the title.
    pub badges: Badges,

    /// Adds a credit line at the bottom of the README.
    pub credit: bool,
}

/// Badge toggles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Badges {
    pub travis_ci: bool,
    pub code_cov: bool,
    pub golang_ci: bool,
    pub go_doc: bool,
    pub go_report_card: bool,
}

impl RenderConfig {
    /// Creates a configuration with every optional section disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(DocsError::InvalidConfig)
    }

    /// Sets the title override.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the import path override.
    pub fn with_import_path(mut self, import_path: impl Into<String>) -> Self {
        self.import_path = import_path.into();
        self
    }

    /// Enables the functions section.
    pub fn with_functions(mut self) -> Self {
        self.functions = true;
        self
    }

    /// Enables the types section, optionally with factories and methods.
    pub fn with_types(mut self, factories: bool, methods: bool) -> Self {
        self.types = true;
        self.factories = factories;
        self.methods = methods;
        self
    }

    /// Skips both the examples and the sub packages sections.
    pub fn minimal(mut self) -> Self {
        self.skip_examples = true;
        self.skip_sub_packages = true;
        self
    }

    pub(crate) fn show_factories(&self) -> bool {
        self.types && self.factories
    }

    pub(crate) fn show_methods(&self) -> bool {
        self.types && self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_configuration() {
        let config = RenderConfig::from_json(
            r#"{
                "title": "My Title",
                "import_path": "github.com/user/project",
                "functions": true,
                "types": true,
                "methods": true,
                "skip_sub_packages": true,
                "badges": {"go_doc": true, "travis_ci": true},
                "credit": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.title, "My Title");
        assert!(config.functions);
        assert!(config.show_methods());
        assert!(!config.show_factories());
        assert!(config.badges.go_doc && config.badges.travis_ci);
        assert!(!config.badges.code_cov);
        assert!(config.credit);
    }

    #[test]
    fn missing_keys_default_to_disabled() {
        let config = RenderConfig::from_json("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn rejects_malformed_configuration() {
        assert!(matches!(
            RenderConfig::from_json("{\"functions\": "),
            Err(DocsError::InvalidConfig(_))
        ));
        assert!(matches!(
            RenderConfig::from_json(r#"{"functions": "yes"}"#),
            Err(DocsError::InvalidConfig(_))
        ));
        assert!(RenderConfig::from_json(r#"{"unknown": true}"#).is_err());
    }

    #[test]
    fn factories_need_types() {
        let config = RenderConfig {
            factories: true,
            ..Default::default()
        };
        assert!(!config.show_factories());
    }
}
