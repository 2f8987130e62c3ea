//! Integration tests for the Filepress CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bounded worker pool"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("filepress"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// An empty directory is not an error, just an empty batch
#[test]
fn test_compress_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("compress")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching files found"));
}

/// Zero workers is a configuration error, fatal before any job runs
#[test]
fn test_zero_jobs_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.bin"), b"payload").unwrap();

    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("mutate")
        .arg(temp_dir.path())
        .args(["--ext", "bin", "--jobs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("capacity must be at least 1"));

    // The batch never started, so the file is untouched.
    assert_eq!(fs::read(temp_dir.path().join("a.bin")).unwrap(), b"payload");
}

/// Full mutate batch: every file grows, summary counts every job
#[test]
fn test_mutate_batch() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["a.bin", "b.bin", "c.bin"] {
        fs::write(temp_dir.path().join(name), b"original content").unwrap();
    }

    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("mutate")
        .arg(temp_dir.path())
        .args(["--ext", "bin", "--jobs", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 succeeded"));

    for name in ["a.bin", "b.bin", "c.bin"] {
        let mutated = fs::read(temp_dir.path().join(name)).unwrap();
        assert!(mutated.len() > b"original content".len());
        assert!(mutated.starts_with(b"original content"));
    }
}

/// A failing job is reported but does not fail the batch
#[test]
fn test_failed_job_does_not_fail_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.bin"), b"content").unwrap();
    fs::write(temp_dir.path().join("empty.bin"), b"").unwrap();

    let mut cmd = Command::cargo_bin("filepress").unwrap();
    cmd.arg("mutate")
        .arg(temp_dir.path())
        .args(["--ext", "bin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded"))
        .stdout(predicate::str::contains("1 failed"));
}

/// JSON output renders the final batch state only
#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.bin"), b"some bytes").unwrap();

    let mut cmd = Command::cargo_bin("filepress").unwrap();
    let assert = cmd
        .arg("mutate")
        .arg(temp_dir.path())
        .args(["--ext", "bin", "--quiet", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let state: serde_json::Value = serde_json::from_str(&stdout).expect("stdout must be JSON");
    assert_eq!(state["total"], 1);
    assert_eq!(state["succeeded"], 1);
    assert_eq!(state["failed"], 0);
}
