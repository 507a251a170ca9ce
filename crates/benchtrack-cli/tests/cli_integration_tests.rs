// Dweve Benchtrack - Benchmark History and Regression Tracking
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use benchtrack_test::fixtures;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Test helper to create a benchtrack command bound to a history file
fn benchtrack_cmd(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("benchtrack").expect("Failed to find benchtrack binary");
    cmd.env_remove("BENCHTRACK_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(data);
    cmd
}

// Test helper to write a run payload into the temp dir
fn write_run(dir: &TempDir, name: &str, commit: &str, date: i64, value: f64) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, fixtures::run_payload(commit, date, &[("basic", value, "ops/s")]))
        .expect("Failed to write run");
    path
}

fn sample_history(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("data.js");
    fs::write(&path, fixtures::sample_data_js()).expect("Failed to write history");
    path
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    Command::cargo_bin("benchtrack")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("benchmark history and regression tracking"))
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_no_subcommand_fails() {
    Command::cargo_bin("benchtrack").unwrap().assert().failure();
}

// ===== Ingest Tests =====

#[test]
fn test_ingest_creates_history() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data.js");
    let run = write_run(&dir, "run.json", "abc123", 1000, 10.0);

    benchtrack_cmd(&data)
        .arg("ingest")
        .arg("My Suite")
        .arg(&run)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded abc123 in 'My Suite' (position 0)"))
        .stdout(predicate::str::contains("No regressions detected"));

    let text = fs::read_to_string(&data).unwrap();
    assert!(text.starts_with("window.BENCHMARK_DATA = {"));
    assert!(text.contains("\"My Suite\""));
}

#[test]
fn test_ingest_duplicate_is_noop() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);
    let path = dir.path().join("dup.json");
    fs::write(
        &path,
        fixtures::run_payload(fixtures::SAMPLE_LATEST_COMMIT, 5, &[("basic", 1.0, "ops/s")]),
    )
    .unwrap();

    benchtrack_cmd(&data)
        .arg("ingest")
        .arg(fixtures::SAMPLE_SUITE)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already recorded"));

    assert_eq!(fs::read_to_string(&data).unwrap(), fixtures::sample_data_js());
}

#[test]
fn test_ingest_fail_on_regression() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("history.json");
    for (i, value) in [9000.0, 9100.0, 9050.0].iter().enumerate() {
        let run = write_run(&dir, &format!("h{}.json", i), &format!("h{}", i), 1000 + i as i64, *value);
        benchtrack_cmd(&data)
            .arg("ingest")
            .arg("s")
            .arg(&run)
            .arg("--fail-on-regression")
            .assert()
            .success();
    }

    let run = write_run(&dir, "new.json", "new", 5000, 4700.0);
    benchtrack_cmd(&data)
        .args(["--window", "3", "--threshold", "0.1"])
        .arg("ingest")
        .arg("s")
        .arg(&run)
        .arg("--fail-on-regression")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[MODERATE] basic"))
        .stderr(predicate::str::contains("1 regression(s) detected"));

    // The run is recorded even when the gate fails.
    benchtrack_cmd(&data)
        .args(["latest", "s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commit new"));
}

#[test]
fn test_ingest_invalid_payload() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data.js");
    let run = dir.path().join("bad.json");
    fs::write(&run, fixtures::run_payload("abc", 0, &[("basic", 1.0, "ops/s")])).unwrap();

    benchtrack_cmd(&data)
        .arg("ingest")
        .arg("s")
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: invalid run"));

    assert!(!data.exists());
}

#[test]
fn test_ingest_missing_run_file() {
    let dir = TempDir::new().unwrap();
    benchtrack_cmd(&dir.path().join("data.js"))
        .args(["ingest", "s", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_ingest_json_output() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data.js");
    let run = write_run(&dir, "run.json", "abc", 1000, 1.0);

    let output = benchtrack_cmd(&data)
        .arg("--json")
        .arg("ingest")
        .arg("s")
        .arg(&run)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"], "inserted");
    assert_eq!(value["index"], 0);
    assert_eq!(value["commit"], "abc");
    assert!(value["detection"]["findings"].as_array().unwrap().is_empty());
}

#[test]
fn test_ingest_from_stdin() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data.js");

    benchtrack_cmd(&data)
        .args(["ingest", "s", "-"])
        .write_stdin(fixtures::jmh_run_payload())
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 0123456789abcdef"));

    let text = fs::read_to_string(&data).unwrap();
    assert!(text.contains("\"extra\": \"iterations: 3\\nforks: 1\\nthreads: 1\""));
}

// ===== Query Tests =====

#[test]
fn test_suites_and_latest() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);

    benchtrack_cmd(&data)
        .arg("suites")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}\t8 run(s)", fixtures::SAMPLE_SUITE)));

    benchtrack_cmd(&data)
        .arg("latest")
        .arg(fixtures::SAMPLE_SUITE)
        .assert()
        .success()
        .stdout(predicate::str::contains(fixtures::SAMPLE_LATEST_COMMIT))
        .stdout(predicate::str::contains("4803.1377158147625 ops/s"));
}

#[test]
fn test_series_output() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);

    let output = benchtrack_cmd(&data)
        .arg("series")
        .arg(fixtures::SAMPLE_SUITE)
        .arg(fixtures::SAMPLE_BASIC_BENCH)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.starts_with("2025-09-20T15:21:48.186Z\t8126.562931014215"));

    benchtrack_cmd(&data)
        .args(["series", fixtures::SAMPLE_SUITE, "no.such.bench"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_unknown_suite() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);
    benchtrack_cmd(&data)
        .args(["latest", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suite 'Nope' not found"));
}

// ===== Detect / Prune / Check Tests =====

#[test]
fn test_detect_latest_in_sample() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);

    let output = benchtrack_cmd(&data)
        .arg("--json")
        .arg("detect")
        .arg(fixtures::SAMPLE_SUITE)
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["commit_id"], fixtures::SAMPLE_LATEST_COMMIT);
    assert_eq!(value["window_entries"], 5);
}

#[test]
fn test_prune_keep() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);

    benchtrack_cmd(&data)
        .args(["prune", fixtures::SAMPLE_SUITE, "--keep", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pruned 6 run(s)"));

    benchtrack_cmd(&data)
        .arg("suites")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 run(s)"));
}

#[test]
fn test_prune_requires_bound() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);
    benchtrack_cmd(&data)
        .args(["prune", fixtures::SAMPLE_SUITE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--keep"));
}

#[test]
fn test_check_sample_and_corrupt() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);
    benchtrack_cmd(&data)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 suite(s), 8 run(s)"));

    fs::write(&data, "window.BENCHMARK_DATA = [").unwrap();
    benchtrack_cmd(&data).arg("check").assert().failure();
}

#[test]
fn test_check_reports_unsorted_history() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("history.json");
    let run = |id: &str, date: i64| {
        format!(
            r#"{{"commit": {{"author": {{"name": "a"}}, "committer": {{"name": "a"}}, "id": "{}", "message": "m"}}, "date": {}, "tool": "t", "benches": []}}"#,
            id, date
        )
    };
    fs::write(
        &data,
        format!(
            r#"{{"lastUpdate": 2000, "repoUrl": "r", "entries": {{"s": [{}, {}]}}}}"#,
            run("b", 2000),
            run("a", 1000)
        ),
    )
    .unwrap();

    benchtrack_cmd(&data)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("history check failed: 1 problem(s) found"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let data = sample_history(&dir);
    let config = dir.path().join("benchtrack.json");
    fs::write(&config, r#"{"retention": {"max_entries": 3}}"#).unwrap();

    benchtrack_cmd(&data)
        .arg("--config")
        .arg(&config)
        .args(["prune", fixtures::SAMPLE_SUITE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pruned 5 run(s)"));
}
