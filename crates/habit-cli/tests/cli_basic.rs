//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(dir, args, "")
}

fn run_cli_with_input(dir: &Path, args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_habit"))
        .arg("--data-dir")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn list_json(dir: &Path) -> Vec<serde_json::Value> {
    let (code, stdout, _) = run_cli(dir, &["habit", "list", "--json"]);
    assert_eq!(code, 0, "habit list failed");
    serde_json::from_str(&stdout).expect("list output is JSON")
}

fn add_habit(dir: &Path, name: &str) -> String {
    let (code, stdout, stderr) = run_cli(dir, &["habit", "add", name]);
    assert_eq!(code, 0, "habit add failed: {stderr}");
    assert!(stdout.contains("Habit created:"));
    list_json(dir)
        .into_iter()
        .find(|h| h["name"] == name)
        .and_then(|h| h["id"].as_str().map(str::to_string))
        .expect("created habit is listed")
}

#[test]
fn test_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    add_habit(dir.path(), "Read 30 mins");

    let habits = list_json(dir.path());
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["streak"], 0);
    assert!(habits[0]["end"].is_null());
    assert!(dir.path().join("habits.json").exists());
}

#[test]
fn test_add_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["habit", "add", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Please enter a habit name!"));
    assert!(list_json(dir.path()).is_empty());
}

#[test]
fn test_custom_duration_requires_end() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) =
        run_cli(dir.path(), &["habit", "add", "Run", "--duration", "custom"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Please select a custom end date!"));
}

#[test]
fn test_end_without_custom_duration_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["habit", "add", "Run", "--duration", "week", "--end", "2099-01-01"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("--end only applies to --duration custom"));
    assert!(list_json(dir.path()).is_empty());
}

#[test]
fn test_week_duration_sets_end() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["habit", "add", "Run", "--duration", "week"]);
    assert_eq!(code, 0);
    let habits = list_json(dir.path());
    assert!(habits[0]["end"].is_string());
}

#[test]
fn test_check_and_streak() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), "Meditate");

    let (code, stdout, _) = run_cli(dir.path(), &["habit", "check", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Streak: 1"));

    let (_, stdout, _) = run_cli(dir.path(), &["habit", "streak", &id]);
    assert_eq!(stdout.trim(), "1");

    let (code, _, _) = run_cli(dir.path(), &["habit", "uncheck", &id]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["habit", "streak", &id]);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_check_before_creation_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), "Meditate");

    let (code, _, stderr) = run_cli(dir.path(), &["habit", "check", &id, "--date", "2000-01-01"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("can no longer be changed"));
}

#[test]
fn test_delete_needs_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), "Meditate");

    let (code, stdout, _) = run_cli_with_input(dir.path(), &["habit", "delete", &id], "n\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Delete cancelled"));
    assert_eq!(list_json(dir.path()).len(), 1);

    let (code, stdout, _) = run_cli_with_input(dir.path(), &["habit", "delete", &id], "y\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Habit deleted"));
    assert!(list_json(dir.path()).is_empty());

    let (code, _, stderr) = run_cli(dir.path(), &["habit", "streak", &id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_rename_to_blank_keeps_name() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), "Meditate");

    let (code, _, _) = run_cli(dir.path(), &["habit", "rename", &id, "  "]);
    assert_ne!(code, 0);
    assert_eq!(list_json(dir.path())[0]["name"], "Meditate");
}

#[test]
fn test_week_json_has_seven_cells() {
    let dir = tempfile::tempdir().unwrap();
    add_habit(dir.path(), "Meditate");

    let (code, stdout, _) = run_cli(dir.path(), &["week", "--json", "--offset", "-1"]);
    assert_eq!(code, 0);
    let rows: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cells"].as_array().unwrap().len(), 7);
}

#[test]
fn test_week_offset_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["week", "--offset", "100000000"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: week out of range"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "tracker.confirm_delete", "false"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "tracker.confirm_delete"]);
    assert_eq!(stdout.trim(), "false");

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}
