//! Integration tests for the typesync-gen binary.
//!
//! These tests verify end-to-end CLI behavior using assert_cmd.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use typesync_gen::test_utils::sample_manifest_json;

fn gen_cmd() -> Command {
    Command::cargo_bin("typesync-gen").unwrap()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("typesync-routes.json"), sample_manifest_json()).unwrap();
    dir
}

#[test]
fn cli_shows_help() {
    gen_cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--translator-priority"))
        .stdout(predicate::str::contains("--skip-unannotated"))
        .stdout(predicate::str::contains("--function-name-format"));
}

#[test]
fn cli_generates_files_and_prints_warnings() {
    let dir = workspace();

    gen_cmd()
        .current_dir(dir.path())
        .args(["generate", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: skipping unannotated endpoint 'unannotated'"));

    assert!(dir.path().join("out/types.ts").exists());
    assert!(dir.path().join("out/apis.ts").exists());
}

#[test]
fn cli_accepts_harness_flag_grammar() {
    let dir = workspace();

    gen_cmd()
        .current_dir(dir.path())
        .args([
            "generate",
            "out",
            "-t",
            "annotations",
            "-t",
            "flask",
            "--translator-priority",
            "flask:3",
            "--skip-unannotated=false",
            "-i",
            "--inference-can-eval",
            "--types-file",
            "t.ts",
            "--apis-file",
            "a.ts",
            "--return-type-format",
            "{r_pc}{m_uc}Ret",
            "--args-type-format",
            "{r_pc}{m_uc}Args",
            "--function-name-format",
            "{m_lc}{r_pc}",
        ])
        .assert()
        .success();

    let apis = fs::read_to_string(dir.path().join("out/a.ts")).unwrap();
    assert!(apis.contains("import * as types from \"./t\";"));
    assert!(apis.contains("Promise<types.MainGETRet>"));
}

#[test]
fn cli_fails_on_missing_manifest() {
    let dir = TempDir::new().unwrap();

    gen_cmd()
        .current_dir(dir.path())
        .args(["generate", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("typesync-routes.json"));
}

#[test]
fn cli_fails_on_bad_format() {
    let dir = workspace();

    gen_cmd()
        .current_dir(dir.path())
        .args(["generate", "out", "--function-name-format", "{nope}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));

    assert!(!dir.path().join("out/apis.ts").exists());
}

#[test]
fn cli_rejects_malformed_priority() {
    gen_cmd()
        .args(["generate", "out", "--translator-priority", "flask"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ID:PRIORITY"));
}
