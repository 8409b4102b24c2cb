#![deny(clippy::all)]

//! README generation from Go package documentation.
//!
//! This crate provides:
//! - A converter from doc comment text to Markdown (paragraphs, headings,
//!   code and diff blocks, inline links and emphasis).
//! - A README assembler that renders a package, its sub-packages and
//!   examples according to a [`RenderConfig`].
//! - A concurrent sub-package fetcher over a pluggable [`PackageSource`].
//! - A newline normalizer for the generated output.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod generators;
pub mod markdown;
pub mod model;
pub mod normalize;
pub mod readme;
pub mod source;

pub use config::{Badges, RenderConfig};
pub use error::{DocsError, FetchError, FetchErrors, Result};
pub use fetcher::{FetchOptions, FetchOutcome, SubPackageFetcher};
pub use markdown::{MarkdownOptions, to_markdown};
pub use model::{ExampleDoc, FuncDoc, Package, SourcePos, SubPackage, TypeDoc, ValueDoc};
pub use normalize::{NewlineLimiter, normalize};
pub use readme::{ReadmeData, ReadmeGenerator, ReadmeReport, render_data};
pub use source::{ManifestSource, PackageSource};

pub use generators::markdown::render_markdown;

#[cfg(feature = "json")]
pub use generators::json::render_json;
