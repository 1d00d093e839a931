//! E2E lifecycle tests: add, toggle, delete, clear, and the undo/redo chain.
//!
//! Each test runs `tk` as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the tk binary, rooted in `dir`.
fn tk(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tk"));
    cmd.current_dir(dir);
    // Suppress tracing output on stderr.
    cmd.env("TICK_LOG", "error");
    cmd
}

fn init_project(dir: &Path) {
    tk(dir).args(["init"]).assert().success();
}

/// Add a task via CLI, return its id.
fn add_task(dir: &Path, text: &str) -> String {
    let output = tk(dir)
        .args(["add", text, "--json"])
        .output()
        .expect("add should not crash");
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value =
        serde_json::from_slice(&output.stdout).expect("add --json should produce valid JSON");
    json["id"].as_i64().expect("id field").to_string()
}

/// Run `tk list --json` and return the tasks array.
fn list_json(dir: &Path) -> Vec<Value> {
    let output = tk(dir)
        .args(["list", "--json"])
        .output()
        .expect("list should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    json["tasks"].as_array().cloned().unwrap_or_default()
}

/// Run `tk show <id> --json` and return the task object.
fn show_json(dir: &Path, id: &str) -> Value {
    let output = tk(dir)
        .args(["show", id, "--json"])
        .output()
        .expect("show should not crash");
    assert!(
        output.status.success(),
        "show failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

/// Run `tk undo --json` and return the undone label (null when empty).
fn undo_json(dir: &Path) -> Value {
    let output = tk(dir)
        .args(["undo", "--json"])
        .output()
        .expect("undo should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    json["undone"].clone()
}

fn redo_json(dir: &Path) -> Value {
    let output = tk(dir)
        .args(["redo", "--json"])
        .output()
        .expect("redo should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    json["redone"].clone()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn init_then_list_is_empty() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    assert!(list_json(dir.path()).is_empty());
}

#[test]
fn commands_outside_a_project_fail_with_a_hint() {
    let dir = TempDir::new().expect("tempdir");
    let output = tk(dir.path())
        .args(["list"])
        .output()
        .expect("list should not crash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tk init"), "stderr was: {stderr}");
}

#[test]
fn add_then_list_shows_the_task() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    let id = add_task(dir.path(), "Buy milk");
    let tasks = list_json(dir.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["id"].as_i64().expect("id").to_string(), id);
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["category"], "personal");
    assert_eq!(tasks[0]["priority"], "medium");
}

#[test]
fn blank_add_is_a_noop_and_pushes_no_history() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    tk(dir.path()).args(["add", "   "]).assert().success();
    assert!(list_json(dir.path()).is_empty());
    // Nothing was committed, so there is nothing to undo.
    assert!(undo_json(dir.path()).is_null());
}

#[test]
fn done_toggles_and_undo_redo_walk_the_chain() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    let id = add_task(dir.path(), "A");

    tk(dir.path()).args(["done", &id, "-q"]).assert().success();
    assert_eq!(show_json(dir.path(), &id)["completed"], true);

    assert_eq!(undo_json(dir.path()), "toggle");
    assert_eq!(show_json(dir.path(), &id)["completed"], false);

    assert_eq!(redo_json(dir.path()), "toggle");
    assert_eq!(show_json(dir.path(), &id)["completed"], true);
}

#[test]
fn undo_with_empty_history_reports_nothing() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    tk(dir.path())
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicates::str::contains("nothing to undo"));
    tk(dir.path())
        .args(["redo"])
        .assert()
        .success()
        .stdout(predicates::str::contains("nothing to redo"));
}

#[test]
fn delete_then_undo_restores_the_task() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    let id = add_task(dir.path(), "keep me");
    tk(dir.path()).args(["rm", &id]).assert().success();
    assert!(list_json(dir.path()).is_empty());

    assert_eq!(undo_json(dir.path()), "delete");
    let tasks = list_json(dir.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "keep me");
}

#[test]
fn clear_then_undo_restores_everything() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add_task(dir.path(), "A");
    add_task(dir.path(), "B");

    tk(dir.path()).args(["clear"]).assert().success();
    assert!(list_json(dir.path()).is_empty());

    assert_eq!(undo_json(dir.path()), "clear");
    assert_eq!(list_json(dir.path()).len(), 2);
}

#[test]
fn committing_after_undo_clears_the_redo_stack() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add_task(dir.path(), "A");
    add_task(dir.path(), "B");

    assert_eq!(undo_json(dir.path()), "add");
    add_task(dir.path(), "C");

    // The redo history was invalidated by the new action.
    assert!(redo_json(dir.path()).is_null());
    let listed = list_json(dir.path());
    let mut names: Vec<String> = listed
        .iter()
        .map(|t| t["text"].as_str().expect("text").to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn edits_on_missing_ids_change_nothing() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    add_task(dir.path(), "A");

    tk(dir.path())
        .args(["done", "12345"])
        .assert()
        .success()
        .stdout(predicates::str::contains("nothing changed"));
    tk(dir.path())
        .args(["rm", "12345"])
        .assert()
        .success()
        .stdout(predicates::str::contains("nothing changed"));

    assert_eq!(list_json(dir.path()).len(), 1);
}

#[test]
fn edit_patches_fields_and_is_undoable() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    let id = add_task(dir.path(), "draft");

    tk(dir.path())
        .args(["edit", &id, "--text", "final", "-p", "high", "--notes", "check twice"])
        .assert()
        .success();
    let task = show_json(dir.path(), &id);
    assert_eq!(task["text"], "final");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["notes"], "check twice");

    assert_eq!(undo_json(dir.path()), "update");
    assert_eq!(show_json(dir.path(), &id)["text"], "draft");
}

#[test]
fn history_cap_from_config_drops_oldest_entries() {
    let dir = TempDir::new().expect("tempdir");
    init_project(dir.path());
    std::fs::write(
        dir.path().join(".tick/config.toml"),
        "[history]\nmax_depth = 2\n",
    )
    .expect("config written");

    add_task(dir.path(), "A");
    add_task(dir.path(), "B");
    add_task(dir.path(), "C");

    assert_eq!(undo_json(dir.path()), "add");
    assert_eq!(undo_json(dir.path()), "add");
    // Depth was capped at 2; the first add is no longer reachable.
    assert!(undo_json(dir.path()).is_null());
    assert_eq!(list_json(dir.path()).len(), 1);
}
