//! Integration tests for the typesync CLI.
//!
//! These tests verify end-to-end CLI behavior using assert_cmd.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn typesync_cmd() -> Command {
    Command::cargo_bin("typesync").unwrap()
}

fn project(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("backend")).unwrap();
    fs::write(dir.path().join("backend/app.py"), "").unwrap();
    fs::write(dir.path().join("typesync.toml"), config).unwrap();
    dir
}

#[test]
fn cli_shows_help() {
    typesync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep a generated API client in sync"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("--debug"));
}

#[test]
fn cli_shows_version() {
    typesync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("typesync 0.1.0"));
}

#[test]
fn args_prints_command_line() {
    let dir = project(
        "outDir = 'web/api'\nbackendRoot = 'backend'\ntranslators = ['pydantic']\nskipUnannotated = false\n",
    );

    typesync_cmd()
        .current_dir(dir.path())
        .arg("args")
        .assert()
        .success()
        .stdout(predicate::str::contains("flask\ntypesync\ngenerate\n"))
        .stdout(predicate::str::contains("web/api\n-t\npydantic\n--skip-unannotated=false\n"));
}

#[test]
fn args_without_config_uses_flags() {
    let dir = TempDir::new().unwrap();

    typesync_cmd()
        .current_dir(dir.path())
        .args(["args", "--out-dir", "out", "--backend-root", "be"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cwd: "))
        .stdout(predicate::str::contains("be\n"));
}

#[test]
fn missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();

    typesync_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("typesync.toml"));
}

#[cfg(unix)]
#[test]
fn generate_reports_warnings_and_finishes() {
    let dir = project(
        r#"
outDir = "out"
backendRoot = "backend"
command = "sh"
subcommand = ["-c", "echo x > \"$1/types.ts\"; echo 'Warning: skipping main'", "generator"]
"#,
    );

    typesync_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("codegen finished"))
        .stderr(predicate::str::contains("warning: skipping main"));

    assert!(dir.path().join("out/types.ts").exists());
}

#[cfg(unix)]
#[test]
fn generate_fails_with_generator_status() {
    let dir = project(
        r#"
outDir = "out"
backendRoot = "backend"
command = "sh"
subcommand = ["-c", "exit 4", "generator"]
"#,
    );

    typesync_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("warning: codegen failed with status 4"));
}

#[test]
fn generate_reports_missing_generator() {
    let dir = project("outDir = 'out'\nbackendRoot = 'backend'\ncommand = 'typesync-no-such-generator'\n");

    typesync_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("typesync-no-such-generator"));
}
