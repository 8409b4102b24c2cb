//! JSON views of the data a README is rendered from.

#[cfg(feature = "json")]
use chrono::Utc;
use serde::Serialize;

use crate::{
    error::{DocsError, Result},
    readme::ReadmeData,
};

/// Pretty-printed JSON of the render input, as logged before rendering.
pub fn data_json(data: &ReadmeData) -> Result<String> {
    to_pretty_json(data)
}

/// JSON dump of the render input, stamped with the crate version and the
/// generation time. Failed sub-package fetches are listed in `fetch_errors`.
#[cfg(feature = "json")]
pub fn render_json(data: &ReadmeData) -> Result<String> {
    to_pretty_json(&JsonPayload {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        readme: data,
        fetch_errors: data.fetch_errors.iter().map(ToString::to_string).collect(),
    })
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|error| DocsError::Other {
        message: format!("failed serializing README data: {error}"),
    })
}

#[cfg(feature = "json")]
#[derive(Serialize)]
struct JsonPayload<'a> {
    version: &'static str,
    generated_at: String,
    readme: &'a ReadmeData,
    fetch_errors: Vec<String>,
}
