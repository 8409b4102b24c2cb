//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use readmegen::DocsError;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Docs(e) => docs_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert DocsError to miette Report
pub fn docs_error_to_miette(err: DocsError) -> Report {
    match err {
        DocsError::PackageNotFound { import_path } => miette::miette!(
            "Package '{}' not found\n\nHint: Check the import path and that the manifest lists it",
            import_path
        ),
        DocsError::InvalidManifest { path, message } => miette::miette!(
            "Invalid package manifest {}: {}\n\nHint: The manifest must look like {{\"packages\": {{\"<import path>\": {{...}}}}}}",
            path.display(),
            message
        ),
        DocsError::InvalidConfig(e) => miette::miette!(
            "Invalid render configuration: {}\n\nHint: Check readmegen.json syntax and field types",
            e
        ),
        DocsError::Timeout { import_path } => miette::miette!(
            "Fetching '{}' timed out\n\nHint: Raise --timeout",
            import_path
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::path::PathBuf;

    #[test]
    fn package_not_found_gets_a_hint() {
        let report = cli_error_to_miette(CliError::Docs(DocsError::PackageNotFound {
            import_path: "example.com/missing".to_string(),
        }));
        let msg = report.to_string();
        assert!(msg.contains("example.com/missing"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn config_errors_keep_their_message() {
        let report = cli_error_to_miette(ConfigError::NotFound(PathBuf::from("x.json")).into());
        assert!(report.to_string().starts_with("Configuration error: "));
        assert!(report.to_string().contains("x.json"));
    }
}
