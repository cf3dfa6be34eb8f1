//! Integration tests for CLI commands.

use serde_json::json;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const EMPTY_OBJECT_ETAG: &str = r#"W/"RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o=""#;
const SORTED_AB_ETAG: &str = r#"W/"02JqwwqH5vemQoIzs8aCmZdoZfpVCOQmfFQVx2r3p3I=""#;

fn write_input(contents: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.json");
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path.to_string_lossy().to_string())
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_stable-etag"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn run_cli_with_stdin(args: &[&str], stdin: &str) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stable-etag"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

#[test]
fn test_canonicalize_sorts_keys() {
    let (_temp_dir, path) = write_input(r#"{ "b": {"z": 1, "y": 2}, "a": [1, {"d": 4, "c": 3}] }"#);

    let (success, stdout, _) = run_cli(&["canonicalize", &path]);
    assert!(success);
    assert_eq!(stdout.trim_end(), r#"{"a":[1,{"c":3,"d":4}],"b":{"y":2,"z":1}}"#);
}

#[test]
fn test_canonicalize_from_stdin() {
    let (success, stdout, _) = run_cli_with_stdin(&["canonicalize"], "\"héllo\"\n");
    assert!(success);
    assert_eq!(stdout.trim_end(), "\"héllo\"");
}

#[test]
fn test_etag_command() {
    let (_temp_dir, path) = write_input(r#"{"b": 1, "a": 2}"#);

    let (success, stdout, _) = run_cli(&["etag", &path]);
    assert!(success);
    assert_eq!(stdout.trim_end(), SORTED_AB_ETAG);
}

#[test]
fn test_etag_json_output() {
    let (_temp_dir, path) = write_input("{}");

    let (success, stdout, _) = run_cli(&["etag", &path, "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, json!({"etag": EMPTY_OBJECT_ETAG, "canonical_len": 2}));
}

#[test]
fn test_verify_match() {
    let (_temp_dir, path) = write_input(r#"{"a": 2, "b": 1}"#);

    let (success, stdout, _) = run_cli(&["verify", SORTED_AB_ETAG, &path]);
    assert!(success);
    assert_eq!(stdout.trim_end(), "match");
}

#[test]
fn test_verify_mismatch_exits_nonzero() {
    let (_temp_dir, path) = write_input(r#"{"a": 2, "b": 2}"#);

    let (success, stdout, _) = run_cli(&["verify", SORTED_AB_ETAG, &path, "--json"]);
    assert!(!success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["matches"], false);
    assert_eq!(parsed["etag"], SORTED_AB_ETAG);
}

#[test]
fn test_verify_rejects_malformed_etag() {
    let (_temp_dir, path) = write_input("{}");

    let (success, _, stderr) = run_cli(&["verify", "\"abc\"", &path]);
    assert!(!success);
    assert!(stderr.contains("Invalid etag"));
}

#[test]
fn test_invalid_json_input() {
    let (_temp_dir, path) = write_input("{not json");

    let (success, _, stderr) = run_cli(&["etag", &path]);
    assert!(!success);
    assert!(stderr.contains("invalid JSON"));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    let (success, _, stderr) = run_cli(&["canonicalize", &path.to_string_lossy()]);
    assert!(!success);
    assert!(stderr.contains("failed to read file"));
}
