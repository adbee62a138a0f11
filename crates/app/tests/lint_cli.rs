//! Integration tests for the `rulecheck` binary.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::process::{Command, Output};

use tempfile::tempdir;

fn rulecheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rulecheck"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run rulecheck")
}

#[test]
fn test_lint_valid_and_invalid_documents() {
    let dir = tempdir().expect("Failed to create temp directory");
    let valid = dir.path().join("valid.yaml");
    let invalid = dir.path().join("invalid.json");

    fs::write(
        &valid,
        "rules:\n  - description: created\n    event: { service: s, entity: e, event: created }\n    responseCode: 201\n    before: seed\n",
    )
    .expect("Failed to write document");
    fs::write(&invalid, r#"{ "rules": [{ "description": "no response", "request": {} }] }"#)
        .expect("Failed to write document");

    let output = rulecheck(&[
        "lint",
        "--hooks",
        "seed",
        valid.to_str().expect("utf-8 path"),
        invalid.to_str().expect("utf-8 path"),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains(&format!("ok {} (1 rule)", valid.display())));
    assert!(stdout.contains(&format!("FAIL {}: [INVALID_RULES]", invalid.display())));
    assert!(stdout.contains("Response must be an object"));
}

#[test]
fn test_lint_passes() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("rules.json");
    fs::write(
        &path,
        r#"{ "rules": [{ "description": "ok", "request": { "method": "GET" }, "response": { "code": 200 } }] }"#,
    )
    .expect("Failed to write document");

    let output = rulecheck(&["lint", path.to_str().expect("utf-8 path")]);

    assert!(output.status.success());
}

#[test]
fn test_usage_errors_exit_with_two() {
    let output = rulecheck(&["lint"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no files to lint"));
}
