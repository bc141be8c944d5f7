//! Workout timeline construction.
//!
//! A workout's exercise list expands into a flat, time-ordered sequence of
//! steps: active sets, rest between sets, rest between exercises. Offsets
//! are whole seconds from workout start; steps are contiguous and the
//! sequence never ends on a rest.
//!
//! Building is deterministic and side-effect-free. It is cheap, but callers
//! should still memoize per workout instance rather than rebuilding every
//! tick.

use crate::config::TimingConfig;
use crate::{Effort, Exercise, RepTarget};
use serde::Serialize;

/// What a timeline step represents
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    ExerciseActive,
    SetRest,
    ExerciseRest,
}

/// One step of an expanded workout plan
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct TimelineStep {
    pub kind: StepKind,
    /// Seconds from workout start
    pub start_seconds: u32,
    pub end_seconds: u32,
    /// Index into the exercise list the timeline was built from
    pub exercise_index: usize,
    /// For rest steps, the set just finished
    pub current_set: u32,
    pub total_sets: u32,
}

/// Identity of a step for edge detection; two ticks landing in the same
/// step compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepIdentity {
    pub exercise_index: usize,
    pub current_set: u32,
    pub kind: StepKind,
}

impl TimelineStep {
    pub fn duration_seconds(&self) -> u32 {
        self.end_seconds - self.start_seconds
    }

    pub fn identity(&self) -> StepIdentity {
        StepIdentity {
            exercise_index: self.exercise_index,
            current_set: self.current_set,
            kind: self.kind,
        }
    }
}

/// Planned duration of one active set.
///
/// Timed sets use their duration verbatim. Rep sets multiply the target by
/// the per-rep time. Max-effort sets have no intrinsic count, so the plan
/// assigns them `timing.max_rep_estimate` nominal reps to keep the timeline
/// advancing; the operator controls the real elapsed time.
pub fn active_set_seconds(exercise: &Exercise, timing: &TimingConfig) -> u32 {
    match &exercise.effort {
        Effort::Timed { seconds } => *seconds,
        Effort::Reps { target, tempo } => {
            let per_rep = tempo.per_rep_seconds(timing.default_rep_seconds);
            let reps = match target {
                RepTarget::Count(n) => *n,
                RepTarget::Max => timing.max_rep_estimate,
            };
            reps * per_rep
        }
    }
}

/// Expand an exercise list into a contiguous step sequence.
pub fn build_timeline(exercises: &[Exercise], timing: &TimingConfig) -> Vec<TimelineStep> {
    let mut steps = Vec::new();
    let mut cursor = 0u32;

    for (exercise_index, exercise) in exercises.iter().enumerate() {
        let total_sets = exercise.sets.total();

        for set in 1..=total_sets {
            let duration = active_set_seconds(exercise, timing);
            steps.push(TimelineStep {
                kind: StepKind::ExerciseActive,
                start_seconds: cursor,
                end_seconds: cursor + duration,
                exercise_index,
                current_set: set,
                total_sets,
            });
            cursor += duration;

            if set < total_sets {
                steps.push(TimelineStep {
                    kind: StepKind::SetRest,
                    start_seconds: cursor,
                    end_seconds: cursor + timing.set_rest_seconds,
                    exercise_index,
                    current_set: set,
                    total_sets,
                });
                cursor += timing.set_rest_seconds;
            }
        }

        if exercise_index + 1 < exercises.len() {
            steps.push(TimelineStep {
                kind: StepKind::ExerciseRest,
                start_seconds: cursor,
                end_seconds: cursor + timing.exercise_rest_seconds,
                exercise_index,
                current_set: total_sets,
                total_sets,
            });
            cursor += timing.exercise_rest_seconds;
        }
    }

    steps
}

/// Total planned workout length: the final step's end offset.
pub fn total_seconds(steps: &[TimelineStep]) -> u32 {
    steps.last().map(|s| s.end_seconds).unwrap_or(0)
}
