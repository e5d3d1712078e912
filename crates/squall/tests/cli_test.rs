//! Integration tests for the `squall` CLI binary.
//!
//! These tests validate argument parsing, help output, and error handling —
//! all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `squall` binary with env isolation.
///
/// Clears all `SQUALL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn squall_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("squall");
    cmd.env("HOME", "/tmp/squall-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/squall-cli-test-nonexistent")
        .env_remove("SQUALL_PROFILE")
        .env_remove("SQUALL_API_URL")
        .env_remove("SQUALL_OUTPUT")
        .env_remove("SQUALL_TIMEOUT")
        .env_remove("SQUALL_TOKEN")
        .env_remove("SQUALL_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = squall_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    squall_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("weather alert")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("rules"))
            .and(predicate::str::contains("alerts")),
    );
}

#[test]
fn test_version_flag() {
    squall_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("squall"));
}

#[test]
fn test_rules_create_help_lists_kinds() {
    squall_cmd()
        .args(["rules", "create", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("temp-below")
                .and(predicate::str::contains("wind"))
                .and(predicate::str::contains("rain")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = squall_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_status_not_signed_in() {
    let output = squall_cmd().arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("Not signed in") || text.contains("login"),
        "Expected sign-in hint:\n{text}"
    );
}

#[test]
fn test_rules_list_not_signed_in() {
    let output = squall_cmd().args(["rules", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
}

#[test]
fn test_unknown_profile_fails() {
    let output = squall_cmd()
        .args(["--profile", "nonexistent", "status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("nonexistent"),
        "Expected unknown profile in error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format_rejected() {
    let output = squall_cmd()
        .args(["--output", "xml", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
}
