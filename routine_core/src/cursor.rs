//! Locating the current workout step and deriving its display state.

use crate::config::TimingConfig;
use crate::timeline::{total_seconds, StepKind, TimelineStep};
use crate::{Effort, Exercise, RepTarget, Tempo};

/// Where an elapsed offset falls in a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor<'a> {
    Step(&'a TimelineStep),
    /// At or beyond the final step's end; terminal
    Completed,
}

/// Find the step containing `elapsed_seconds` (half-open [start, end)).
///
/// Negative elapsed time is not expected; callers gate on the
/// active-workout check first.
pub fn locate(steps: &[TimelineStep], elapsed_seconds: f64) -> Cursor<'_> {
    steps
        .iter()
        .find(|s| {
            elapsed_seconds >= s.start_seconds as f64 && elapsed_seconds < s.end_seconds as f64
        })
        .map_or(Cursor::Completed, Cursor::Step)
}

/// Phase of a tempo rep
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacePhase {
    Up,
    Down,
}

/// Presentation-ready state for the current step
#[derive(Clone, Debug, PartialEq)]
pub enum StepDisplay {
    /// Countdown for a fixed-duration set
    TimedSet {
        name: String,
        current_set: u32,
        total_sets: u32,
        remaining_seconds: u32,
    },
    /// Rep counter, with an up/down phase for tempo exercises
    RepSet {
        name: String,
        current_set: u32,
        total_sets: u32,
        rep_number: u32,
        phase: Option<PacePhase>,
    },
    /// Operator-paced set; no counter, no countdown
    MaxEffortSet {
        name: String,
        current_set: u32,
        total_sets: u32,
    },
    /// Rest countdown plus what comes next
    Rest {
        remaining_seconds: u32,
        next_name: String,
        next_set: u32,
    },
    Completed,
}

/// Derive the display state for an elapsed offset.
pub fn display(
    exercises: &[Exercise],
    steps: &[TimelineStep],
    elapsed_seconds: f64,
    timing: &TimingConfig,
) -> StepDisplay {
    let step = match locate(steps, elapsed_seconds) {
        Cursor::Step(step) => step,
        Cursor::Completed => return StepDisplay::Completed,
    };
    let Some(exercise) = exercises.get(step.exercise_index) else {
        return StepDisplay::Completed;
    };

    let remaining = (step.end_seconds as f64 - elapsed_seconds).ceil() as u32;
    let seconds_into_step = elapsed_seconds - step.start_seconds as f64;

    match step.kind {
        StepKind::ExerciseActive => match &exercise.effort {
            Effort::Timed { .. } => StepDisplay::TimedSet {
                name: exercise.name.clone(),
                current_set: step.current_set,
                total_sets: step.total_sets,
                remaining_seconds: remaining,
            },
            Effort::Reps {
                target: RepTarget::Count(_),
                tempo,
            } => {
                let per_rep = tempo.per_rep_seconds(timing.default_rep_seconds) as f64;
                let rep_number = (seconds_into_step / per_rep).floor() as u32 + 1;
                let phase = match tempo {
                    Tempo::UpDown { up_seconds, .. } => {
                        let into_rep = seconds_into_step % per_rep;
                        if into_rep < *up_seconds as f64 {
                            Some(PacePhase::Up)
                        } else {
                            Some(PacePhase::Down)
                        }
                    }
                    _ => None,
                };
                StepDisplay::RepSet {
                    name: exercise.name.clone(),
                    current_set: step.current_set,
                    total_sets: step.total_sets,
                    rep_number,
                    phase,
                }
            }
            Effort::Reps {
                target: RepTarget::Max,
                ..
            } => StepDisplay::MaxEffortSet {
                name: exercise.name.clone(),
                current_set: step.current_set,
                total_sets: step.total_sets,
            },
        },
        StepKind::SetRest => StepDisplay::Rest {
            remaining_seconds: remaining,
            next_name: exercise.name.clone(),
            next_set: step.current_set + 1,
        },
        StepKind::ExerciseRest => StepDisplay::Rest {
            remaining_seconds: remaining,
            next_name: exercises
                .get(step.exercise_index + 1)
                .map(|e| e.name.clone())
                .unwrap_or_default(),
            next_set: 1,
        },
    }
}

/// Whole-workout progress for the elapsed offset, 0.0-100.0.
pub fn progress_percent(steps: &[TimelineStep], elapsed_seconds: f64) -> f64 {
    let total = total_seconds(steps);
    if total == 0 {
        return 0.0;
    }
    (elapsed_seconds / total as f64 * 100.0).clamp(0.0, 100.0)
}
