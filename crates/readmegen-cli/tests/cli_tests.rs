//! End-to-end tests running the readmegen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "packages": {
        "github.com/user/project": {
            "name": "project",
            "doc": "Package project does things.\n\nUsage\n\nCall Run.",
            "funcs": [
                {"name": "Run", "decl": "func Run() error", "doc": "Run runs it."}
            ],
            "subdirectories": ["sub", "gone"]
        },
        "github.com/user/project/sub": {
            "name": "sub",
            "doc": "Package sub helps. A lot."
        }
    }
}"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("packages.json"), MANIFEST).unwrap();
    temp
}

fn readmegen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("readmegen").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(["--manifest", "packages.json"]);
    cmd
}

#[test]
fn writes_readme_to_stdout() {
    let temp = project();

    readmegen(temp.path())
        .arg("github.com/user/project")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# project\n\nPackage project does things.\n\n#### Usage\n\nCall Run.\n\n",
        ))
        .stdout(predicate::str::contains(
            "## Sub Packages\n\n* [sub](./sub): Package sub helps.\n",
        ))
        .stdout(predicate::str::contains("func Run").not());
}

#[test]
fn missing_sub_package_is_a_warning() {
    let temp = project();

    readmegen(temp.path())
        .arg("github.com/user/project")
        .assert()
        .success()
        .stdout(predicate::str::contains("[gone]").not())
        .stderr(predicate::str::contains("github.com/user/project/gone"));
}

#[test]
fn flags_enable_sections() {
    let temp = project();

    readmegen(temp.path())
        .args(["github.com/user/project", "--functions", "--credit", "--title", "Project"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Project\n\n"))
        .stdout(predicate::str::contains("### func Run\n\n`func Run() error`\n\nRun runs it.\n"))
        .stdout(predicate::str::ends_with(
            "---\n\nReadme created from Go doc with readmegen\n",
        ));
}

#[test]
fn config_file_is_picked_up() {
    let temp = project();
    fs::write(
        temp.path().join("readmegen.json"),
        r#"{"skip_sub_packages": true, "badges": {"go_doc": true}}"#,
    )
    .unwrap();

    readmegen(temp.path())
        .arg("github.com/user/project")
        .assert()
        .success()
        .stdout(predicate::str::contains("pkg.go.dev/github.com/user/project"))
        .stdout(predicate::str::contains("Sub Packages").not());
}

#[test]
fn environment_overrides_config_file() {
    let temp = project();
    fs::write(temp.path().join("readmegen.json"), r#"{"title": "File"}"#).unwrap();

    readmegen(temp.path())
        .arg("github.com/user/project")
        .env("READMEGEN_TITLE", "Env")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Env\n\n"));
}

#[test]
fn writes_output_file() {
    let temp = project();

    readmegen(temp.path())
        .args(["github.com/user/project", "-o", "README.md", "--skip-sub-packages"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let readme = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# project\n\n"));
    assert!(!temp.path().join(".README.md.tmp").exists());
}

#[test]
fn json_format_dumps_package_data() {
    let temp = project();

    let output = readmegen(temp.path())
        .args(["github.com/user/project", "--format", "json", "--skip-sub-packages"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["readme"]["package"]["name"], "project");
    assert_eq!(value["readme"]["config"]["skip_sub_packages"], true);
}

#[test]
fn invalid_config_fails_without_output() {
    let temp = project();
    fs::write(temp.path().join("readmegen.json"), r#"{"functions": "yes"}"#).unwrap();

    readmegen(temp.path())
        .args(["github.com/user/project", "-o", "README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("functions"));

    assert!(!temp.path().join("README.md").exists());
}

#[test]
fn missing_manifest_is_reported() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("readmegen")
        .unwrap()
        .current_dir(temp.path())
        .args(["--manifest", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn unknown_package_fails() {
    let temp = project();

    readmegen(temp.path())
        .arg("github.com/user/other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("github.com/user/other"));
}
