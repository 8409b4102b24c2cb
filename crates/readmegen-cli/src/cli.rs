//! Command-line interface definition for readmegen.
//!
//! Every section toggle of the README has a flag. Flags only ever switch a
//! section on; anything left unset falls back to the config file and the
//! `READMEGEN_*` environment variables.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// readmegen - README.md files from Go package documentation
#[derive(Parser, Debug)]
#[command(
    name = "readmegen",
    version,
    about = "Generate README.md files from Go package documentation",
    long_about = "readmegen renders the documentation of a Go package into a README.md file.\n\
                  Package documentation is read from a JSON manifest produced by a Go doc\n\
                  extractor; sub-packages listed in the manifest are fetched concurrently."
)]
pub struct Cli {
    /// Import path of the package to document
    #[arg(value_name = "IMPORT_PATH", default_value = ".")]
    pub import_path: String,

    /// JSON manifest holding the documentation of every package
    #[arg(short, long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// Configuration file (defaults to readmegen.json when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the README to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Give up fetching sub-packages after SECS seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub sections: SectionArgs,

    #[command(flatten)]
    pub badges: BadgeArgs,

    /// Enable verbose logging (debug level)
    ///
    /// Also dumps the package data the README is rendered from.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Section toggles.
#[derive(Args, Debug, Default, Clone)]
pub struct SectionArgs {
    /// Override the README title (defaults to the package name)
    #[arg(long)]
    pub title: Option<String>,

    /// Override the import path shown in badges, e.g. github.com/user/project/v2
    #[arg(long = "import-path", value_name = "PATH")]
    pub import_path_override: Option<String>,

    /// Document constants
    #[arg(long)]
    pub consts: bool,

    /// Document variables
    #[arg(long)]
    pub vars: bool,

    /// Document functions
    #[arg(long)]
    pub functions: bool,

    /// Document types
    #[arg(long)]
    pub types: bool,

    /// Document functions returning a type under that type (needs --types)
    #[arg(long)]
    pub factories: bool,

    /// Document the methods of a type under that type (needs --types)
    #[arg(long)]
    pub methods: bool,

    /// Omit the examples section
    #[arg(long)]
    pub skip_examples: bool,

    /// Omit the sub packages section
    #[arg(long)]
    pub skip_sub_packages: bool,

    /// Never tag code blocks as diffs
    #[arg(long)]
    pub no_diff_blocks: bool,

    /// Fetch sub-packages recursively
    #[arg(long)]
    pub recursive: bool,

    /// Add a credit line at the bottom of the README
    #[arg(long)]
    pub credit: bool,
}

/// Badge toggles.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct BadgeArgs {
    /// Show a Travis CI badge
    #[arg(long)]
    pub badge_travisci: bool,

    /// Show a Codecov badge
    #[arg(long)]
    pub badge_codecov: bool,

    /// Show a GolangCI badge
    #[arg(long)]
    pub badge_golangci: bool,

    /// Show a GoDoc badge
    #[arg(long)]
    pub badge_godoc: bool,

    /// Show a Go Report Card badge
    #[arg(long)]
    pub badge_goreportcard: bool,
}

/// What the command writes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    /// README.md content
    #[value(name = "markdown")]
    Markdown,

    /// The package data the README is rendered from
    #[value(name = "json")]
    Json,
}
