//! End-to-end tests for the `gallery` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let entrypoints = dir.path().join(".agent-gallery/entrypoints");
    fs::create_dir_all(&entrypoints).expect("Failed to create entrypoints dir");

    fs::write(
        entrypoints.join("echo.md"),
        "---\nname: echo\ndescription: Repeats the topic\nmodel: test-model\nfields: [topic]\n---\n",
    )
    .expect("Failed to write echo.md");
    fs::write(
        entrypoints.join("broken.md"),
        "---\nname: broken\nmodel: test-failure-model\nfailure-policy: capture\n---\n",
    )
    .expect("Failed to write broken.md");
    dir
}

fn gallery(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gallery").expect("binary should build");
    cmd.arg("--root").arg(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_shows_entrypoints() {
    let dir = project();
    gallery(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("echo"))
        .stdout(predicate::str::contains("Repeats the topic"))
        .stdout(predicate::str::contains("broken"));
}

#[test]
fn test_run_prints_content() {
    let dir = project();
    gallery(&dir)
        .args(["run", "echo", "--arg", "topic=whales"])
        .assert()
        .success()
        .stdout("whales\n");
}

#[test]
fn test_run_json_response() {
    let dir = project();
    gallery(&dir)
        .args(["run", "echo", "positional input", "--json"])
        .assert()
        .success()
        .stdout("{\"success\":true,\"content\":\"positional input\"}\n");
}

#[test]
fn test_run_stream_json_chunks() {
    let dir = project();
    gallery(&dir)
        .args(["run", "echo", "--arg", "topic=owls", "--stream", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"session_info\""))
        .stdout(predicate::str::contains("{\"type\":\"content\",\"content\":\"owls\"}"))
        .stdout(predicate::str::contains("{\"type\":\"complete\",\"content\":\"owls\"}"))
        .stdout(predicate::str::contains("\"type\":\"session_end\""));
}

#[test]
fn test_captured_failure_exits_non_zero() {
    let dir = project();
    gallery(&dir)
        .args(["run", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mock failure"));
}

#[test]
fn test_unknown_entrypoint_fails() {
    let dir = project();
    gallery(&dir)
        .args(["run", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entrypoint 'missing' not found"));
}

#[test]
fn test_empty_project_lists_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    gallery(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entrypoints found"));
}
