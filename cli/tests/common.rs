//! # Redock CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! that declares `mod common;` gets a `redock_cmd()` pointing at the compiled
//! binary, isolated from the developer's own configuration and `RUST_LOG`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// `redock` binary with an empty configuration and default logging.
pub fn redock_cmd() -> Command {
    let mut cmd = Command::cargo_bin("redock").expect("Failed to find redock binary for testing");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("REDOCK_CONFIG");
    // Keep the developer's ~/.config/redock out of the picture.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("redock-tests-no-config"));
    cmd
}

/// `redock` binary reading `contents` as its config file. Keep the returned
/// directory alive for as long as the command runs.
pub fn redock_cmd_with_config(contents: &str) -> (Command, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write config file");
    let mut cmd = redock_cmd();
    cmd.env("REDOCK_CONFIG", &path);
    (cmd, dir)
}
