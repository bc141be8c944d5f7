//! Integration tests for the pacer binary.
//!
//! These tests verify end-to-end behavior including:
//! - One-shot status evaluation at fixed times
//! - Schedule and workout plan listings
//! - Audio preference persistence

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pacer"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal daily-routine tracker"));
}

#[test]
fn test_status_prep_window() {
    // Two minutes before the 03:30 water event.
    cli()
        .arg("status")
        .arg("--at")
        .arg("03:28:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water in 2 min. Get ready!"));
}

#[test]
fn test_status_instant_action_window() {
    // Inside the five-second action window.
    cli()
        .arg("status")
        .arg("--at")
        .arg("03:30:03")
        .assert()
        .success()
        .stdout(predicate::str::contains("Drink water now"));

    // One second past it: back to resting.
    cli()
        .arg("status")
        .arg("--at")
        .arg("03:30:06")
        .assert()
        .success()
        .stdout(predicate::str::contains("Drink water now").not())
        .stdout(predicate::str::contains("On rest."));
}

#[test]
fn test_status_during_workout() {
    cli()
        .arg("status")
        .arg("--at")
        .arg("04:10:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout in progress..."))
        .stdout(predicate::str::contains("Active workout: wo1 (04:00 - 05:15)"))
        .stdout(predicate::str::contains("REST 10s - next: Stretch (set 1)"));
}

#[test]
fn test_status_shows_next_occurrences() {
    cli()
        .arg("status")
        .arg("--at")
        .arg("03:28:00")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Next water:   00:02:00  Drink 250 ml (before morning workout)",
        ))
        .stdout(predicate::str::contains(
            "Next meal:    00:17:00  Ensure + 240 ml milk + 2 boiled eggs",
        ))
        .stdout(predicate::str::contains("Next workout: 00:32:00  Workout - Pull-ups"));
}

#[test]
fn test_status_challenge_prompt_and_countdown() {
    cli()
        .arg("status")
        .arg("--at")
        .arg("12:00:10")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Optional challenge available: 1 set of 20 V-ups",
        ));

    cli()
        .arg("status")
        .arg("--at")
        .arg("11:59:50")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next optional challenge in 1m"));
}

#[test]
fn test_status_json_snapshot() {
    let output = cli()
        .arg("status")
        .arg("--json")
        .arg("--at")
        .arg("03:28:00")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let snapshot: serde_json::Value =
        serde_json::from_slice(&output).expect("status --json should emit valid JSON");

    assert_eq!(snapshot["status"]["kind"], "water_prep");
    assert_eq!(snapshot["next"]["water"]["event"]["id"], "w1");
    assert_eq!(snapshot["next"]["water"]["seconds_until"], 120);
    assert_eq!(snapshot["next"]["water"]["day_offset"], 0);
    assert!(snapshot["active_workout"].is_null());
}

#[test]
fn test_status_rejects_malformed_time() {
    cli()
        .arg("status")
        .arg("--at")
        .arg("25:99")
        .assert()
        .failure();
}

#[test]
fn test_schedule_listing() {
    cli()
        .arg("schedule")
        .arg("--at")
        .arg("12:00:00")
        .assert()
        .success()
        .stdout(predicate::str::contains("3:30 AM"))
        .stdout(predicate::str::contains("4:00 AM - 5:15 AM"))
        .stdout(predicate::str::contains("Drink 250 ml (with dinner)"))
        .stdout(predicate::str::contains(
            "Optional challenge windows: 4:50 AM, 10:35 AM",
        ));
}

#[test]
fn test_plan_morning_workout() {
    cli()
        .arg("plan")
        .arg("wo1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan for wo1 (04:00 - 05:15):"))
        .stdout(predicate::str::contains("Pull-ups set 1/3 (max reps)"))
        .stdout(predicate::str::contains("V-ups set 1/2 (20 reps, 2s up, 2s down)"))
        .stdout(predicate::str::contains("rest 45s"))
        .stdout(predicate::str::contains("rest 20s, change exercise"))
        .stdout(predicate::str::contains("Total: 13:10 planned"));
}

#[test]
fn test_plan_unknown_workout_fails() {
    cli()
        .arg("plan")
        .arg("wo99")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available workouts: wo1, wo2, wo3"));
}

#[test]
fn test_audio_defaults_to_enabled() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("audio")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Audio cues: enabled"));
}

#[test]
fn test_audio_preference_persists_across_runs() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("audio")
        .arg("off")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Audio cues: disabled"));

    // A fresh invocation reads the stored preference back.
    cli()
        .arg("audio")
        .arg("show")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Audio cues: disabled"));

    cli()
        .arg("audio")
        .arg("toggle")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Audio cues: enabled"));

    assert!(temp_dir.path().join("prefs.json").exists());
}
