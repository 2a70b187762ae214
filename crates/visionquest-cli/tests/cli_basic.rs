//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points HOME at a scratch directory so the user's config is never touched.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn cli(home: &Path) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-q", "-p", "visionquest-cli", "--"])
        .env("HOME", home)
        .env_remove("VISIONQUEST_ENV");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = cli(home)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Feed `script` to `visionquest session` on stdin.
fn run_session(home: &Path, args: &[&str], script: &str) -> (String, String, i32) {
    let mut child = cli(home)
        .arg("session")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn session");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    let output = child.wait_with_output().expect("Failed to wait on session");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

#[test]
fn test_score_matches_worked_example() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &[
            "score",
            "--therapist",
            "75,70,85,80,78,72",
            "--clarity",
            "7",
            "--comfort",
            "6",
            "--post-npc",
            "12.5",
            "--post-npa",
            "15.5",
        ],
    );
    assert_eq!(code, 0, "score failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["composite"], 66);
    assert_eq!(json["npc_gain"], 0.0);
}

#[test]
fn test_score_rewards_reaching_targets() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &[
            "score",
            "--therapist",
            "75,70,85,80,78,72",
            "--clarity",
            "7",
            "--comfort",
            "6",
            "--post-npc",
            "8",
            "--post-npa",
            "6",
        ],
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["composite"], 68);
}

#[test]
fn test_score_rejects_wrong_rating_count() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "score",
            "--therapist",
            "75,70",
            "--clarity",
            "7",
            "--comfort",
            "6",
            "--post-npc",
            "8",
            "--post-npa",
            "6",
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("six therapist ratings"));
}

#[test]
fn test_quick_session() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["quick", "--exercise", "fusion", "--name", "Mia", "--seed", "4"],
    );
    assert_eq!(code, 0, "quick failed: {stderr}");
    assert!(stderr.contains("Started Fusion training for Mia!"));

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["exercise"], "fusion");
    let duration = json["duration"].as_u64().unwrap();
    assert!((3..=10).contains(&duration));
    assert!(json["score"].as_u64().unwrap() <= 100);
}

#[test]
fn test_simulate_json_is_reproducible() {
    let home = tempfile::tempdir().unwrap();
    let args = ["simulate", "--count", "5", "--seed", "11", "--json"];
    let (first, _, code) = run_cli(home.path(), &args);
    assert_eq!(code, 0);
    let (second, _, _) = run_cli(home.path(), &args);

    let a: serde_json::Value = serde_json::from_str(&first).unwrap();
    let b: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(a["summary"]["count"], 5);
    assert_eq!(a["summary"], b["summary"]);
}

#[test]
fn test_simulate_exports_csv() {
    let home = tempfile::tempdir().unwrap();
    let csv = home.path().join("log.csv");
    let (_, stderr, code) = run_cli(
        home.path(),
        &["simulate", "--count", "3", "--seed", "2", "--csv", csv.to_str().unwrap()],
    );
    assert_eq!(code, 0, "simulate failed: {stderr}");

    let content = std::fs::read_to_string(&csv).unwrap();
    assert!(content.starts_with("id,recorded_at,patient_name"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_config_get_default() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "session.countdown_units"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "patient.default_age", "30"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "patient.default_age"]);
    assert_eq!(stdout.trim(), "30");
}

#[test]
fn test_config_rejects_zero_countdown() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "session.countdown_units", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("session.countdown_units"));

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "session.countdown_units"]);
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_session_rejects_zero_countdown_flag() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_session(home.path(), &["--countdown", "0"], "quit\n");
    assert_ne!(code, 0);
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_session_records_and_scores() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
patient 9 Mia van Dijk
pre 12 14
post 12.5 15.5
rate therapist 75 70 85 80 78 72
rate patient 7 6 moderate completed
start fusion
save
stats
quit
";
    let (stdout, stderr, code) =
        run_session(home.path(), &["--countdown", "2", "--tick-ms", "10"], script);
    assert_eq!(code, 0, "session failed: {stderr}");

    assert!(stdout.contains("patient: Mia van Dijk (9, child)"));
    assert!(stdout.contains("started Fusion training"));
    assert!(stdout.contains("1 left"));
    assert!(stdout.contains("Fusion complete"));
    assert!(stdout.contains("saved session #1: score 66%"));
}

#[test]
fn test_session_stop_cancels_countdown() {
    let home = tempfile::tempdir().unwrap();
    let script = "start vergence\nstop\nstatus\nquit\n";
    let (stdout, stderr, code) =
        run_session(home.path(), &["--countdown", "1000", "--tick-ms", "50"], script);
    assert_eq!(code, 0, "session failed: {stderr}");

    assert!(stdout.contains("Vergence stopped with"));
    assert!(stdout.contains("Vergence: Idle"));
}

#[test]
fn test_session_json_events() {
    let home = tempfile::tempdir().unwrap();
    let script = "select smooth-pursuit\nstart\n";
    let (stdout, _, code) = run_session(
        home.path(),
        &["--countdown", "1", "--tick-ms", "10", "--json"],
        script,
    );
    assert_eq!(code, 0);

    let types: Vec<String> = stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(
        types,
        vec!["ExerciseSelected", "ExerciseStarted", "ExerciseCompleted"]
    );
}
