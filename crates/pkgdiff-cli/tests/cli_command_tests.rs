//! CLI integration tests
//!
//! Spawn the built `pkgdiff` binary against temp directories and check
//! exit status and stdout.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn pkgdiff(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pkgdiff"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn seed_store(root: &Path) {
    write(root, "store/pkg/1.0.0/package.json", r#"{"dependencies": {"left-pad": "1.0.0"}}"#);
    write(root, "store/pkg/1.0.0/index.js", "a\nb\nc\n");
    write(root, "store/pkg/2.0.0/package.json", r#"{"dependencies": {"left-pad": "2.0.0"}}"#);
    write(root, "store/pkg/2.0.0/index.js", "a\nB\nc\n");
    write(root, "store/pkg/2.0.0/README.md", "docs\n");
}

// S1: parse prints FileDiff[] JSON
#[test]
fn test_cli_parse_json() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "change.diff",
        "--- a/src/x.js\n+++ b/src/x.js\n@@ -1,2 +1,2 @@\n keep\n-old\n+new\n",
    );

    let output = pkgdiff(dir.path(), &["parse", "change.diff"]);
    let value = stdout_json(&output);

    let files = value.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["newPath"], "src/x.js");
    assert_eq!(files[0]["kind"], "modify");
    assert_eq!(files[0]["hunks"][0]["kind"], "hunk");
}

// S2: --no-merge keeps the delete/insert pair apart
#[test]
fn test_cli_parse_no_merge() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "change.diff",
        "--- a/x\n+++ b/x\n@@ -1 +1 @@\n-value = 1\n+value = 2\n",
    );

    let merged = stdout_json(&pkgdiff(dir.path(), &["parse", "change.diff"]));
    let split = stdout_json(&pkgdiff(dir.path(), &["parse", "--no-merge", "change.diff"]));

    assert_eq!(merged[0]["hunks"][0]["lines"].as_array().unwrap().len(), 1);
    assert_eq!(split[0]["hunks"][0]["lines"].as_array().unwrap().len(), 2);
}

// S3: --summary prints text instead of JSON
#[test]
fn test_cli_parse_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "change.diff", "--- a/x\n+++ b/x\n@@ -1 +1,2 @@\n a\n+b\n");

    let output = pkgdiff(dir.path(), &["parse", "--summary", "change.diff"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("## Diff Summary"));
    assert!(stdout.contains("+1 -0"));
}

// S4: non-finite ratio is rejected with exit code 1
#[test]
fn test_cli_parse_rejects_bad_ratio() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "change.diff", "");

    let output = pkgdiff(
        dir.path(),
        &["parse", "--max-change-ratio", "inf", "change.diff"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "));
    assert!(stderr.contains("ERR_INVALID_OPTIONS"));
}

// S5: compare reports file and dependency changes
#[test]
fn test_cli_compare_json() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());

    let output = pkgdiff(
        dir.path(),
        &["compare", "--store", "store", "pkg", "1.0.0", "2.0.0"],
    );
    let value = stdout_json(&output);

    assert_eq!(value["added"][0]["path"], "README.md");
    assert_eq!(value["modified"][0]["path"], "index.js");
    assert_eq!(value["dependencies"][0]["name"], "left-pad");
    assert_eq!(value["dependencies"][0]["semverBucket"], "major");
    assert_eq!(value["meta"]["truncated"], false);
}

// S6: --max-files caps the listing and marks truncation
#[test]
fn test_cli_compare_max_files() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());

    let output = pkgdiff(
        dir.path(),
        &[
            "compare",
            "--store",
            "store",
            "--max-files",
            "1",
            "pkg",
            "1.0.0",
            "2.0.0",
        ],
    );
    let value = stdout_json(&output);

    let listed = value["added"].as_array().unwrap().len()
        + value["removed"].as_array().unwrap().len()
        + value["modified"].as_array().unwrap().len();
    assert_eq!(listed, 1);
    assert_eq!(value["meta"]["truncated"], true);
    assert_eq!(value["meta"]["warnings"].as_array().unwrap().len(), 1);
}

// S7: config file limits apply
#[test]
fn test_cli_config_file() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());
    write(dir.path(), "pkgdiff.toml", "[limits]\nmax_tree_nodes = 1\n");

    let output = pkgdiff(
        dir.path(),
        &[
            "--config",
            "pkgdiff.toml",
            "compare",
            "--store",
            "store",
            "pkg",
            "1.0.0",
            "2.0.0",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT_TOO_LARGE"));
}

// S8: file prints the structured diff of one path
#[test]
fn test_cli_file_diff() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());

    let output = pkgdiff(
        dir.path(),
        &["file", "--store", "store", "pkg", "1.0.0", "2.0.0", "index.js"],
    );
    let value = stdout_json(&output);

    assert_eq!(value["identical"], false);
    assert_eq!(value["file"]["newPath"], "index.js");
    assert_eq!(value["file"]["kind"], "modify");
}

// S9: unknown version fails with exit code 1
#[test]
fn test_cli_unknown_version() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());

    let output = pkgdiff(
        dir.path(),
        &["compare", "--store", "store", "pkg", "1.0.0", "9.9.9"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Version not found: pkg@9.9.9"));
}

// S10: tree prints the nested file tree
#[test]
fn test_cli_tree() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());

    let output = pkgdiff(dir.path(), &["tree", "--store", "store", "pkg", "2.0.0"]);
    let value = stdout_json(&output);

    let paths: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["README.md", "index.js", "package.json"]);
    assert_eq!(value[0]["type"], "file");
    assert_eq!(value[0]["size"], 5);
}

// S11: compare-trees diffs the output of two tree runs
#[test]
fn test_cli_compare_trees_from_tree_output() {
    let dir = TempDir::new().unwrap();
    seed_store(dir.path());

    for version in ["1.0.0", "2.0.0"] {
        let output = pkgdiff(dir.path(), &["tree", "--store", "store", "pkg", version]);
        assert!(output.status.success());
        fs::write(dir.path().join(format!("{}.json", version)), &output.stdout).unwrap();
    }

    let output = pkgdiff(dir.path(), &["compare-trees", "1.0.0.json", "2.0.0.json"]);
    let value = stdout_json(&output);

    assert_eq!(value["added"][0]["path"], "README.md");
    let modified: Vec<&str> = value["modified"]
        .as_array()
        .unwrap()
        .iter()
        .map(|change| change["path"].as_str().unwrap())
        .collect();
    assert_eq!(modified, vec!["index.js", "package.json"]);
    assert!(value["dependencies"].as_array().unwrap().is_empty());
}

// S12: a malformed tree document is rejected
#[test]
fn test_cli_compare_trees_invalid_document() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "from.json", r#"[{"path": "a.js", "type": "file"}]"#);
    write(dir.path(), "to.json", r#"[{"path": "a.js", "type": "symlink"}]"#);

    let output = pkgdiff(dir.path(), &["compare-trees", "from.json", "to.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_TREE"), "{}", stderr);
}
