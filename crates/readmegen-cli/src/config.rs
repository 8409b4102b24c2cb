//! Layered render configuration.
//!
//! Priority: CLI flags > environment variables > config file > defaults.
//!
//! The config file is `readmegen.json` in the working directory unless
//! `--config` names another one. Environment variables use the
//! `READMEGEN_` prefix and `__` for nesting, e.g. `READMEGEN_FUNCTIONS=true`
//! or `READMEGEN_BADGES__GO_DOC=true`.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use readmegen::RenderConfig;
use serde::Serialize;
use tracing::debug;

use crate::cli::{BadgeArgs, SectionArgs};
use crate::error::{ConfigError, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "readmegen.json";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "READMEGEN_";

/// Loads the render configuration.
///
/// `config_path` must exist when given. Otherwise `readmegen.json` in
/// `base_dir` is used when present.
pub fn load(
    sections: &SectionArgs,
    badges: &BadgeArgs,
    config_path: Option<&Path>,
    base_dir: &Path,
) -> Result<RenderConfig> {
    let mut figment = Figment::new().merge(Serialized::defaults(RenderConfig::default()));

    if let Some(path) = config_file(config_path, base_dir)? {
        debug!("Loading configuration from {}", path.display());
        figment = figment.merge(Json::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    // Flags only switch sections on, so unset flags must not mask the
    // values from the file or the environment.
    figment = figment.merge(Serialized::defaults(Overrides::from_args(sections, badges)));

    figment.extract().map_err(|e| {
        let field = e.path.join(".");
        ConfigError::InvalidValue {
            field: if field.is_empty() {
                "configuration".to_string()
            } else {
                field
            },
            value: e.to_string(),
            hint: format!("Check {CONFIG_FILE} syntax and {ENV_PREFIX}* variables"),
        }
        .into()
    })
}

fn config_file(config_path: Option<&Path>, base_dir: &Path) -> Result<Option<PathBuf>> {
    match config_path {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        None => {
            let default_path = base_dir.join(CONFIG_FILE);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}

/// Values set on the command line.
#[derive(Debug, Default, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    import_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    consts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vars: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    factories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    methods: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_examples: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_sub_packages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    no_diff_blocks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recursive_sub_packages: Option<bool>,
    #[serde(skip_serializing_if = "BadgeOverrides::is_empty")]
    badges: BadgeOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit: Option<bool>,
}

#[derive(Debug, Default, Serialize)]
struct BadgeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    travis_ci: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code_cov: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    golang_ci: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    go_doc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    go_report_card: Option<bool>,
}

fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}

impl Overrides {
    fn from_args(sections: &SectionArgs, badges: &BadgeArgs) -> Self {
        Self {
            title: sections.title.clone(),
            import_path: sections.import_path_override.clone(),
            consts: flag(sections.consts),
            vars: flag(sections.vars),
            functions: flag(sections.functions),
            types: flag(sections.types),
            factories: flag(sections.factories),
            methods: flag(sections.methods),
            skip_examples: flag(sections.skip_examples),
            skip_sub_packages: flag(sections.skip_sub_packages),
            no_diff_blocks: flag(sections.no_diff_blocks),
            recursive_sub_packages: flag(sections.recursive),
            badges: BadgeOverrides {
                travis_ci: flag(badges.badge_travisci),
                code_cov: flag(badges.badge_codecov),
                golang_ci: flag(badges.badge_golangci),
                go_doc: flag(badges.badge_godoc),
                go_report_card: flag(badges.badge_goreportcard),
            },
            credit: flag(sections.credit),
        }
    }
}

impl BadgeOverrides {
    fn is_empty(&self) -> bool {
        self.travis_ci.is_none()
            && self.code_cov.is_none()
            && self.golang_ci.is_none()
            && self.go_doc.is_none()
            && self.go_report_card.is_none()
    }
}
