//! E2E CLI tests for `sow`.
//!
//! Each test runs the binary as a subprocess against a graph file written
//! to an isolated temp directory, and checks stdout/stderr contracts.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the sow binary.
fn sow_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sow"));
    // Suppress tracing output that goes to stderr
    cmd.env("SOWER_LOG", "error");
    cmd
}

/// Write `contents` as a graph file inside `dir`, returning its path.
fn write_graph(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("graph.json");
    std::fs::write(&path, contents).expect("write graph file");
    path
}

const TRIANGLE_PLUS_ISOLATE: &str = r#"{"1": [2, 3], "2": [1, 3], "3": [1, 2], "4": []}"#;

// ---------------------------------------------------------------------------
// Plain output
// ---------------------------------------------------------------------------

#[test]
fn degree_selection_prints_one_seed_per_line() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    sow_cmd()
        .arg(&graph)
        .args(["1", "-D", "2"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn seed_list_repeats_once_per_trial() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    sow_cmd()
        .arg(&graph)
        .args(["3", "-D", "2"])
        .assert()
        .success()
        .stdout("1\n2\n1\n2\n1\n2\n");
}

#[test]
fn zero_trials_print_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    sow_cmd()
        .arg(&graph)
        .args(["0", "-D", "2"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn no_active_metric_selects_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    sow_cmd().arg(&graph).arg("5").assert().success().stdout("");
}

#[test]
fn empty_graph_with_quotas_selects_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), "{}");

    sow_cmd()
        .arg(&graph)
        .args(["2", "-D", "3", "-d", "3", "-i", "3"])
        .assert()
        .success()
        .stdout("");
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[test]
fn json_report_contains_metric_blocks() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    let output = sow_cmd()
        .arg(&graph)
        .args(["2", "-D", "2", "--json"])
        .output()
        .expect("sow should not crash");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON report");
    assert_eq!(report["trials"], 2);
    assert_eq!(report["seeds"], serde_json::json!([1, 2]));
    assert_eq!(report["metrics"]["degree"], serde_json::json!([1, 2]));
}

// ---------------------------------------------------------------------------
// Entropy
// ---------------------------------------------------------------------------

#[test]
fn fixed_rng_seed_makes_entropy_runs_reproducible() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    let run = || {
        let output = sow_cmd()
            .arg(&graph)
            .args(["1", "-D", "2", "--entropy", "1.0", "--rng-seed", "99"])
            .output()
            .expect("sow should not crash");
        assert!(output.status.success());
        output.stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn entropy_output_keeps_the_requested_quota() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    let output = sow_cmd()
        .arg(&graph)
        .args(["1", "-D", "2", "--entropy", "0.5", "--rng-seed", "3"])
        .output()
        .expect("sow should not crash");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.lines().count(), 2);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn missing_graph_file_fails_with_context() {
    sow_cmd()
        .args(["no-such-file.json", "1", "-D", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading graph file"));
}

#[test]
fn malformed_graph_fails_before_selection() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), r#"{"one": [2]}"#);

    sow_cmd()
        .arg(&graph)
        .args(["1", "-D", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing graph adjacency list"));
}

#[test]
fn zero_generations_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), TRIANGLE_PLUS_ISOLATE);

    sow_cmd()
        .arg(&graph)
        .args(["1", "-i", "1", "--generations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selection request"));
}
