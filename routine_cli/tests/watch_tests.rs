//! Tests for the replayed watch loop: per-tick rendering and edge-triggered
//! cue delivery.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pacer"))
}

fn run_watch(at: &str, ticks: u64, data_dir: Option<&TempDir>) -> String {
    let mut cmd = cli();
    cmd.arg("watch").arg("--at").arg(at).arg("--ticks").arg(ticks.to_string());
    if let Some(dir) = data_dir {
        cmd.arg("--data-dir").arg(dir.path());
    }
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn test_watch_emits_one_snapshot_per_tick() {
    let output = run_watch("06:00:00", 3, None);
    assert!(output.contains("[06:00:00]"));
    assert!(output.contains("[06:00:01]"));
    assert!(output.contains("[06:00:02]"));
    assert!(!output.contains("[06:00:03]"));
}

#[test]
fn test_watch_action_cue_fires_exactly_once() {
    // Replay across the 03:30 water event: the prep status was already
    // active at the start, and the action cue fires on the minute edge.
    let output = run_watch("03:29:58", 10, None);

    let action_cues = output.matches(">> Drink water now").count();
    assert_eq!(action_cues, 1, "output was:\n{}", output);

    // The status line itself repeats while the window lasts.
    assert!(output.contains("[03:30:00] Drink water now"));
    assert!(output.contains("[03:30:04] Drink water now"));
    // After the five-second window the status falls back to resting.
    assert!(output.contains("[03:30:05] On rest."));
}

#[test]
fn test_watch_prep_cue_on_entry() {
    // 03:27:59 -> 03:28:01 crosses into the two-minute prep window.
    let output = run_watch("03:27:59", 3, None);
    let prep_cues = output.matches(">> Water in 2 min. Get ready!").count();
    assert_eq!(prep_cues, 1, "output was:\n{}", output);
}

#[test]
fn test_watch_workout_steps_and_cues() {
    let output = run_watch("04:00:00", 3, None);

    // Step rendering with progress.
    assert!(output.contains("wo1"));
    assert!(output.contains("Pull-ups set 1/3: max effort"));

    // The first step announces once, with its vibration pattern.
    let start_cues = output
        .matches(">> Start Pull-ups. Set 1 of 3. max reps.")
        .count();
    assert_eq!(start_cues, 1, "output was:\n{}", output);
    assert!(output.contains("~~ buzz 300/150/300ms"));
}

#[test]
fn test_watch_set_rest_transition_cues_once() {
    // The first pull-up set runs 00:00-00:30; replay across the boundary.
    let output = run_watch("04:00:28", 5, None);

    assert_eq!(output.matches(">> Rest for 45 seconds.").count(), 1);
    assert!(output.contains("REST 45s - next: Pull-ups (set 2)"));
}

#[test]
fn test_watch_audio_off_suppresses_speech_not_vibration() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    cli()
        .arg("audio")
        .arg("off")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let output = run_watch("03:29:58", 5, Some(&temp_dir));
    assert!(!output.contains(">>"), "output was:\n{}", output);
    assert!(output.contains("~~ buzz"));
}

#[test]
fn test_watch_challenge_prompt_cue() {
    let output = run_watch("11:59:58", 5, None);

    let challenge_cues = output
        .matches(">> An optional challenge is now available.")
        .count();
    assert_eq!(challenge_cues, 1, "output was:\n{}", output);
    assert!(output.contains("Optional challenge available: 1 set of 20 V-ups"));
}

#[test]
fn test_watch_resting_renders_countdowns() {
    let output = run_watch("06:00:00", 1, None);
    assert!(output.contains("On rest. Next up in 1h 30m."));
    assert!(output.contains("Next optional challenge in"));
}
