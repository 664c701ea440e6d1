//! Basic CLI E2E tests.
//!
//! Tests run the built binary with HOME pointed at a temp dir so the
//! config file never touches the real user profile.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pacekeeper-cli"))
        .args(args)
        .env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("PACEKEEPER_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_summary_perfect_week() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["summary", "--steps", "10000,10000,10000,10000,10000,10000,10000", "--goal", "10000"],
    );
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["total"], 70000);
    assert_eq!(json["average"], 10000);
    assert_eq!(json["days_goal_met"], 7);
    assert_eq!(json["message"], "perfect");
}

#[test]
fn test_summary_empty_week_text() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["summary", "--goal", "10000", "--text"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Total steps: 0"));
    assert!(stdout.contains("fresh start"));
}

#[test]
fn test_evaluate_reports_milestones() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["evaluate", "--steps", "5200", "--at", "2024-06-01T09:00:00+00:00"],
    );
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    let milestones: Vec<u64> = json["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["kind"] == "milestone")
        .map(|e| e["threshold"].as_u64().unwrap())
        .collect();
    assert_eq!(milestones, vec![1000, 2500, 5000]);
    assert_eq!(json["goals"].as_array().unwrap().len(), 3);
}

#[test]
fn test_replay_dedups_within_day_and_resets_next_day() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("replay.json");
    std::fs::write(
        &file,
        r#"[
            {"at": "2024-06-01T10:00:00+00:00", "steps": 10500},
            {"at": "2024-06-01T12:00:00+00:00", "steps": 11000},
            {"at": "2024-06-02T08:00:00+00:00", "steps": 1200}
        ]"#,
    )
    .unwrap();

    let (stdout, stderr, code) = run_cli(home.path(), &["replay", file.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let json = parse_json(&stdout);
    let steps = json.as_array().unwrap();
    assert_eq!(steps.len(), 3);
    // goal + five milestones
    assert_eq!(steps[0]["events"].as_array().unwrap().len(), 6);
    assert!(steps[1]["events"].as_array().unwrap().is_empty());
    assert_eq!(steps[2]["events"][0]["threshold"], 1000);
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "daily_step_goal", "8000"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "daily_step_goal"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "8000");
}

#[test]
fn test_config_rejects_zero_goal() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "daily_step_goal", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "get", "ui.theme"]);
    assert_ne!(code, 0);
}
