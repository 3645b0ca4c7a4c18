//! `language-sync` バイナリのテスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]
#![allow(deprecated)]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `lang/en.json` と `lang/en/auth.php` を持つプロジェクトを作成する
fn create_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let lang = temp_dir.path().join("lang");
    fs::create_dir_all(lang.join("en")).unwrap();
    fs::write(lang.join("en.json"), r#"{"much": "wow", "such": "amaze"}"#).unwrap();
    fs::write(
        lang.join("en").join("auth.php"),
        "<?php\n\nreturn [\n    'string-1' => 'Translation 1',\n];\n",
    )
    .unwrap();
    temp_dir
}

fn command(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("language-sync").unwrap();
    cmd.current_dir(project.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_all_arguments() {
    let project = create_project();

    command(&project)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SOURCE>").and(predicate::str::contains("<TARGETS>")));
}

#[test]
fn test_missing_target_languages() {
    let project = create_project();

    command(&project).arg("en").assert().code(2).stderr(predicate::str::contains("<TARGETS>"));
}

#[test]
fn test_nonexistent_source_language() {
    let project = create_project();

    command(&project)
        .args(["it", "nl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("The given source language (it) does not exist."));
}

#[test]
fn test_asks_before_overwriting() {
    let project = create_project();

    command(&project)
        .args(["en", "nl"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "This action could overwrite files. Consider backing up all language files or using \
             version control. Continue? [y/n]",
        ));

    assert!(!project.path().join("lang").join("nl.json").exists());
}

#[test]
fn test_syncs_after_confirmation() {
    let project = create_project();

    command(&project).args(["en", "nl"]).write_stdin("y\n").assert().success();

    assert!(project.path().join("lang").join("nl.json").is_file());
}

#[test]
fn test_force_syncs_without_asking() {
    let project = create_project();

    command(&project)
        .args(["en", "nl", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Continue?").not())
        .stdout(predicate::str::contains("+ string-1"));

    let auth = fs::read_to_string(project.path().join("lang").join("nl").join("auth.php")).unwrap();
    assert!(auth.contains("'string-1' => '__MISSING_TRANSLATION__',"));
}

#[test]
fn test_dry_run_does_not_write() {
    let project = create_project();

    command(&project)
        .args(["en", "nl", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("nl.json: created"));

    assert!(!project.path().join("lang").join("nl.json").exists());
    assert!(!project.path().join("lang").join("nl").exists());
}

#[test]
fn test_invalid_config_file() {
    let project = create_project();
    fs::write(project.path().join(".language-sync.json"), r#"{"keySeparator": ""}"#).unwrap();

    command(&project)
        .args(["en", "nl", "--force"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("keySeparator"));
}

#[test]
fn test_malformed_target_still_succeeds() {
    let project = create_project();
    fs::write(project.path().join("lang").join("nl.json"), "not json").unwrap();

    command(&project)
        .args(["en", "nl", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nl.json: failed"))
        .stdout(predicate::str::contains("nl/auth.php: created"));
}
