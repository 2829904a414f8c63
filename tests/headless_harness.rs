//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness exercises `staylens` as a compiled binary via
//! [`std::process::Command`], validating what a script consuming
//! `--headless` output would observe.
//!
//! - **Report JSON**: the sample corpus yields the expected KPIs, rankings
//!   and normalization counts.
//! - **Exit codes**: clean run = 0; unreadable dataset = non-zero with the
//!   path on stderr; `--pretty` without `--headless` is a usage error.
//! - **Config fallback**: a user config file changes the default dataset path,
//!   and an unreadable one falls back to defaults with a warning on stderr.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal)
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

/// The binary with `XDG_CONFIG_HOME` pointed at `config_home` so runs never
/// touch the real user config.
fn staylens(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_staylens"));
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "staylens failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn headless_report_for_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "oyo.json", SAMPLE_ROWS);

    let output = staylens(dir.path())
        .arg(&path)
        .arg("--headless")
        .output()
        .unwrap();
    let json = stdout_json(&output);

    assert_eq!(json["normalization"]["total"], 8);
    assert_eq!(json["normalization"]["kept"], 4);
    assert_eq!(json["normalization"]["rejected"]["rating"], 1);
    assert_eq!(json["normalization"]["rejected"]["city"], 1);
    assert_eq!(json["report"]["kpis"]["hotels"], 4);
    assert_eq!(json["report"]["top_cities"][0]["label"], "Bangalore");
    assert_eq!(json["report"]["correlation"]["labels"][0], "rating");
    assert!(json["report"]["generated_at"].is_string());
}

#[test]
fn pretty_output_is_multiline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "oyo.json", SAMPLE_ROWS);

    let output = staylens(dir.path())
        .arg(&path)
        .args(["--headless", "--pretty"])
        .output()
        .unwrap();
    let json = stdout_json(&output);

    assert!(String::from_utf8_lossy(&output.stdout).lines().count() > 10);
    assert_eq!(json["report"]["kpis"]["hotels"], 4);
}

#[test]
fn missing_dataset_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere.json");

    let output = staylens(dir.path())
        .arg(&missing)
        .arg("--headless")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nowhere.json"), "stderr: {stderr}");
}

#[test]
fn pretty_requires_headless() {
    let dir = tempfile::tempdir().unwrap();
    let output = staylens(dir.path()).arg("--pretty").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn config_supplies_default_dataset_path() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), "listings.jsonl", SAMPLE_JSONL);
    let config_dir = dir.path().join("staylens");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!("[data]\npath = {:?}\n", data.display().to_string()),
    )
    .unwrap();

    let output = staylens(dir.path()).arg("--headless").output().unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["normalization"]["total"], 3);
    assert_eq!(json["report"]["kpis"]["hotels"], 2);
}

#[test]
fn first_run_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "oyo.json", SAMPLE_ROWS);

    let output = staylens(dir.path())
        .arg(&path)
        .arg("--headless")
        .output()
        .unwrap();
    stdout_json(&output);

    let written = std::fs::read_to_string(dir.path().join("staylens/config.toml")).unwrap();
    assert!(written.contains("[normalize]"));
}

#[test]
fn unreadable_config_warns_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "oyo.json", SAMPLE_ROWS);
    let config_dir = dir.path().join("staylens");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[normalize\nmax_rating = ").unwrap();

    let output = staylens(dir.path())
        .arg(&path)
        .arg("--headless")
        .output()
        .unwrap();
    let json = stdout_json(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("using defaults"), "stderr: {stderr}");
    assert_eq!(json["report"]["kpis"]["hotels"], 4);
}
