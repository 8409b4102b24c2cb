#![cfg(feature = "json")]

use std::sync::Arc;

use readmegen::generators::json::render_json;
use readmegen::{ManifestSource, Package, ReadmeGenerator, RenderConfig};

#[tokio::test]
async fn renders_json_dump() {
    let mut root = Package::new("pkg", "");
    root.doc = "Package pkg is a package.".to_string();
    root.subdirectories = vec!["sub".to_string()];

    let source = ManifestSource::new()
        .with_package("example.com/pkg", root)
        .with_package("example.com/pkg/sub", Package::new("sub", ""));
    let generator = ReadmeGenerator::new(Arc::new(source))
        .with_config(RenderConfig::new().with_title("Pkg"));

    let data = generator.load("example.com/pkg").await.expect("should load");
    let json = render_json(&data).expect("should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(value["readme"]["package"]["name"], "pkg");
    assert_eq!(value["readme"]["package"]["import_path"], "example.com/pkg");
    assert_eq!(value["readme"]["sub_packages"][0]["path"], "sub");
    assert_eq!(value["readme"]["config"]["title"], "Pkg");
    assert!(value["generated_at"].is_string());
    assert_eq!(value["fetch_errors"], serde_json::json!([]));
}
