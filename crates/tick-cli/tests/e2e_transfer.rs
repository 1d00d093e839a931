//! E2E import/export tests: roundtrip, validation, and undoable replace.

use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn tk(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tk"));
    cmd.current_dir(dir);
    cmd.env("TICK_LOG", "error");
    cmd
}

fn init_project(dir: &Path) {
    tk(dir).args(["init"]).assert().success();
}

fn add(dir: &Path, text: &str) {
    tk(dir).args(["add", text]).assert().success();
}

fn list_len(dir: &Path) -> usize {
    let output = tk(dir)
        .args(["list", "--json"])
        .output()
        .expect("list should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    json["tasks"].as_array().expect("tasks").len()
}

#[test]
fn export_to_stdout_carries_version_and_tasks() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add(dir.path(), "alpha");
    add(dir.path(), "beta");

    let output = tk(dir.path())
        .args(["export"])
        .output()
        .expect("export should not crash");
    assert!(output.status.success());
    let doc: Value = serde_json::from_slice(&output.stdout).expect("export is JSON");
    assert_eq!(doc["version"], "1.0");
    assert!(doc["exported_at"].is_string());
    assert_eq!(doc["tasks"].as_array().expect("tasks").len(), 2);
}

#[test]
fn export_clear_import_roundtrip() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add(dir.path(), "alpha");
    add(dir.path(), "beta");

    let backup = dir.path().join("backup.json");
    tk(dir.path())
        .args(["export", "--output", backup.to_str().expect("utf-8 path")])
        .assert()
        .success();

    tk(dir.path()).args(["clear"]).assert().success();
    assert_eq!(list_len(dir.path()), 0);

    tk(dir.path())
        .args(["import", backup.to_str().expect("utf-8 path")])
        .assert()
        .success();
    assert_eq!(list_len(dir.path()), 2);
}

#[test]
fn export_into_a_directory_generates_a_backup_filename() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add(dir.path(), "alpha");

    let backups = dir.path().join("backups");
    std::fs::create_dir(&backups).expect("mkdir");
    tk(dir.path())
        .args(["export", "--output", backups.to_str().expect("utf-8 path")])
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(&backups)
        .expect("readdir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(
        entries[0].starts_with("tasks-backup-") && entries[0].ends_with(".json"),
        "unexpected filename: {}",
        entries[0]
    );
}

#[test]
fn import_replaces_but_one_undo_restores() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add(dir.path(), "original");

    let backup = dir.path().join("backup.json");
    tk(dir.path())
        .args(["export", "--output", backup.to_str().expect("utf-8 path")])
        .assert()
        .success();

    add(dir.path(), "second");
    assert_eq!(list_len(dir.path()), 2);

    // Import the one-task backup: full replace, not a merge.
    tk(dir.path())
        .args(["import", backup.to_str().expect("utf-8 path")])
        .assert()
        .success();
    assert_eq!(list_len(dir.path()), 1);

    // The replace was a single history commit.
    tk(dir.path())
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicates::str::contains("import"));
    assert_eq!(list_len(dir.path()), 2);
}

#[test]
fn import_with_non_array_tasks_is_rejected_and_leaves_state_alone() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add(dir.path(), "survivor");

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"tasks": "not-an-array"}"#).expect("written");

    let output = tk(dir.path())
        .args(["import", bad.to_str().expect("utf-8 path")])
        .output()
        .expect("import should not crash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wrong shape"), "stderr was: {stderr}");

    assert_eq!(list_len(dir.path()), 1);
}

#[test]
fn import_with_unparseable_json_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add(dir.path(), "survivor");

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "definitely not json").expect("written");

    let output = tk(dir.path())
        .args(["import", bad.to_str().expect("utf-8 path")])
        .output()
        .expect("import should not crash");
    assert!(!output.status.success());
    assert_eq!(list_len(dir.path()), 1);
}

#[test]
fn import_missing_file_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    let output = tk(dir.path())
        .args(["import", "no-such-file.json"])
        .output()
        .expect("import should not crash");
    assert!(!output.status.success());
}
