//! Edge-triggered speech and vibration intents.
//!
//! The engine returns pure snapshots and keeps no history; announcing a
//! snapshot every second would repeat the same cue endlessly. The consumer
//! therefore owns an `EdgeDetector` - a small memory of the last observed
//! status kind, workout step, and challenge state - and gets a cue back only
//! on the tick where something actually changed. Delayed ticks still produce
//! exactly one cue per transition.

use crate::cursor::{locate, Cursor};
use crate::timeline::{StepIdentity, StepKind, TimelineStep};
use crate::{ChallengeStatus, Effort, Exercise, RepTarget, Status, StatusKind};

/// Vibration request: a single pulse or an alternating on/off sequence,
/// all in milliseconds
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Vibration {
    Single(u32),
    Pattern(Vec<u32>),
}

/// One speech + vibration intent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    pub speech: String,
    pub vibration: Vibration,
}

/// Speech delivery capability
///
/// Implementations must never fail the tick; a platform without a speech
/// engine uses [`NullAnnouncer`]. `cancel` stops any in-flight utterance so
/// announcements do not overlap.
pub trait Announcer {
    fn speak(&mut self, text: &str);
    fn cancel(&mut self) {}
}

/// Vibration delivery capability
pub trait Haptics {
    fn vibrate(&mut self, vibration: &Vibration);
}

/// No-op speech for platforms without an engine
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn speak(&mut self, _text: &str) {}
}

/// No-op vibration for platforms without a motor
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn vibrate(&mut self, _vibration: &Vibration) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepObservation {
    Step(StepIdentity),
    Completed,
}

/// Consumer-held memory for edge detection
#[derive(Default)]
pub struct EdgeDetector {
    last_status: Option<StatusKind>,
    last_step: Option<StepObservation>,
    challenge_prompted: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the global status; returns a cue when the kind changed to one
    /// that warrants an announcement.
    pub fn observe_status(&mut self, status: &Status) -> Option<Cue> {
        let changed = self.last_status != Some(status.kind);
        self.last_status = Some(status.kind);
        if !changed {
            return None;
        }

        match status.kind {
            StatusKind::ActionNowWater => Some(Cue {
                speech: "Drink water now".into(),
                vibration: Vibration::Pattern(vec![200, 100, 200]),
            }),
            StatusKind::ActionNowMeal => Some(Cue {
                speech: "Time to eat".into(),
                vibration: Vibration::Pattern(vec![200, 100, 200]),
            }),
            StatusKind::WorkoutPrep | StatusKind::MealPrep | StatusKind::WaterPrep => Some(Cue {
                speech: status.message.clone(),
                vibration: Vibration::Single(100),
            }),
            // The workout tracker announces its own steps; resting is silent.
            StatusKind::WorkoutActive | StatusKind::Resting => None,
        }
    }

    /// Observe the optional-challenge state; cues once on entering Prompt.
    pub fn observe_challenge(&mut self, challenge: &ChallengeStatus) -> Option<Cue> {
        let prompted = matches!(challenge, ChallengeStatus::Prompt);
        let entering = prompted && !self.challenge_prompted;
        self.challenge_prompted = prompted;

        entering.then(|| Cue {
            speech: "An optional challenge is now available.".into(),
            vibration: Vibration::Pattern(vec![250, 100, 250]),
        })
    }

    /// Observe the workout cursor; cues once per step transition and once
    /// when the workout completes.
    pub fn observe_workout(
        &mut self,
        exercises: &[Exercise],
        steps: &[TimelineStep],
        elapsed_seconds: f64,
    ) -> Option<Cue> {
        let previous = self.last_step;

        match locate(steps, elapsed_seconds) {
            Cursor::Step(step) => {
                let observation = StepObservation::Step(step.identity());
                self.last_step = Some(observation);
                if previous == Some(observation) {
                    return None;
                }
                let exercise = exercises.get(step.exercise_index)?;
                Some(step_cue(step, exercise))
            }
            Cursor::Completed => {
                self.last_step = Some(StepObservation::Completed);
                // Only a workout that was actually underway completes.
                match previous {
                    Some(StepObservation::Step(_)) => Some(Cue {
                        speech: "Workout complete. Great job!".into(),
                        vibration: Vibration::Pattern(vec![100, 50, 100, 50, 100]),
                    }),
                    _ => None,
                }
            }
        }
    }

    /// Forget workout step memory once no workout is active, so the next
    /// session announces from its first step again.
    pub fn workout_ended(&mut self) {
        self.last_step = None;
    }
}

fn step_cue(step: &TimelineStep, exercise: &Exercise) -> Cue {
    match step.kind {
        StepKind::ExerciseActive => Cue {
            speech: format!(
                "Start {}. Set {} of {}. {}.",
                exercise.name,
                step.current_set,
                step.total_sets,
                effort_phrase(exercise)
            ),
            vibration: Vibration::Pattern(vec![300, 150, 300]),
        },
        StepKind::SetRest | StepKind::ExerciseRest => Cue {
            speech: format!("Rest for {} seconds.", step.duration_seconds()),
            vibration: Vibration::Single(400),
        },
    }
}

fn effort_phrase(exercise: &Exercise) -> String {
    match &exercise.effort {
        Effort::Timed { seconds } => format!("{} seconds", seconds),
        Effort::Reps {
            target: RepTarget::Count(n),
            ..
        } => format!("{} reps", n),
        Effort::Reps {
            target: RepTarget::Max,
            ..
        } => "max reps".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::timeline::build_timeline;
    use crate::types::*;

    fn status(kind: StatusKind, message: &str) -> Status {
        Status {
            kind,
            message: message.into(),
        }
    }

    #[test]
    fn test_status_cue_fires_once_per_transition() {
        let mut edges = EdgeDetector::new();
        let prep = status(StatusKind::WaterPrep, "Water in 2 min. Get ready!");

        let cue = edges.observe_status(&prep).unwrap();
        assert_eq!(cue.speech, "Water in 2 min. Get ready!");
        assert_eq!(cue.vibration, Vibration::Single(100));

        // Same kind on following ticks: silent, even if the message changed.
        assert!(edges.observe_status(&prep).is_none());
        let prep_1min = status(StatusKind::WaterPrep, "Water in 1 min. Get ready!");
        assert!(edges.observe_status(&prep_1min).is_none());

        // Kind change fires again.
        let action = status(StatusKind::ActionNowWater, "Drink water now");
        let cue = edges.observe_status(&action).unwrap();
        assert_eq!(cue.speech, "Drink water now");
        assert_eq!(cue.vibration, Vibration::Pattern(vec![200, 100, 200]));
    }

    #[test]
    fn test_resting_and_workout_active_are_silent() {
        let mut edges = EdgeDetector::new();
        assert!(edges
            .observe_status(&status(StatusKind::Resting, "On rest."))
            .is_none());
        assert!(edges
            .observe_status(&status(StatusKind::WorkoutActive, "Workout in progress..."))
            .is_none());
    }

    #[test]
    fn test_challenge_prompt_cues_once() {
        let mut edges = EdgeDetector::new();
        let countdown = ChallengeStatus::Countdown { minutes: 0.5 };

        assert!(edges.observe_challenge(&countdown).is_none());
        let cue = edges.observe_challenge(&ChallengeStatus::Prompt).unwrap();
        assert_eq!(cue.speech, "An optional challenge is now available.");
        assert!(edges.observe_challenge(&ChallengeStatus::Prompt).is_none());

        // Window closes, then the next prompt fires again.
        assert!(edges.observe_challenge(&countdown).is_none());
        assert!(edges.observe_challenge(&ChallengeStatus::Prompt).is_some());
    }

    fn sample_workout() -> Vec<Exercise> {
        vec![
            Exercise {
                name: "V-ups".into(),
                sets: Sets::Count(2),
                effort: Effort::Reps {
                    target: RepTarget::Count(20),
                    tempo: Tempo::UpDown {
                        up_seconds: 2,
                        down_seconds: 2,
                    },
                },
            },
            Exercise {
                name: "Planks".into(),
                sets: Sets::Count(1),
                effort: Effort::Timed { seconds: 60 },
            },
        ]
    }

    #[test]
    fn test_workout_step_cues() {
        let exercises = sample_workout();
        let steps = build_timeline(&exercises, &TimingConfig::default());
        let mut edges = EdgeDetector::new();

        // First tick into the first set.
        let cue = edges.observe_workout(&exercises, &steps, 0.0).unwrap();
        assert_eq!(cue.speech, "Start V-ups. Set 1 of 2. 20 reps.");
        assert_eq!(cue.vibration, Vibration::Pattern(vec![300, 150, 300]));

        // Next second, same step: silent.
        assert!(edges.observe_workout(&exercises, &steps, 1.0).is_none());

        // Into the set rest at 80s.
        let cue = edges.observe_workout(&exercises, &steps, 80.0).unwrap();
        assert_eq!(cue.speech, "Rest for 45 seconds.");
        assert_eq!(cue.vibration, Vibration::Single(400));

        // A delayed tick that skips straight into set 2 still cues once.
        let cue = edges.observe_workout(&exercises, &steps, 130.0).unwrap();
        assert_eq!(cue.speech, "Start V-ups. Set 2 of 2. 20 reps.");
        assert!(edges.observe_workout(&exercises, &steps, 131.0).is_none());
    }

    #[test]
    fn test_timed_step_announces_seconds() {
        let exercises = sample_workout();
        let steps = build_timeline(&exercises, &TimingConfig::default());
        let mut edges = EdgeDetector::new();

        // Jump straight to the plank (80+45+80+20 = 225s in).
        let cue = edges.observe_workout(&exercises, &steps, 226.0).unwrap();
        assert_eq!(cue.speech, "Start Planks. Set 1 of 1. 60 seconds.");
    }

    #[test]
    fn test_completion_cue_requires_prior_step() {
        let exercises = sample_workout();
        let steps = build_timeline(&exercises, &TimingConfig::default());
        let end = crate::timeline::total_seconds(&steps) as f64;

        // Observed mid-workout first, then past the end: one completion cue.
        let mut edges = EdgeDetector::new();
        assert!(edges.observe_workout(&exercises, &steps, 10.0).is_some());
        let cue = edges.observe_workout(&exercises, &steps, end + 1.0).unwrap();
        assert_eq!(cue.speech, "Workout complete. Great job!");
        assert!(edges
            .observe_workout(&exercises, &steps, end + 2.0)
            .is_none());

        // Joining after the end announces nothing.
        let mut late = EdgeDetector::new();
        assert!(late.observe_workout(&exercises, &steps, end + 1.0).is_none());
    }

    #[test]
    fn test_workout_ended_resets_step_memory() {
        let exercises = sample_workout();
        let steps = build_timeline(&exercises, &TimingConfig::default());
        let mut edges = EdgeDetector::new();

        assert!(edges.observe_workout(&exercises, &steps, 0.0).is_some());
        edges.workout_ended();
        // A new session starting at the same step announces again.
        assert!(edges.observe_workout(&exercises, &steps, 0.0).is_some());
    }

    #[test]
    fn test_max_effort_phrase() {
        let exercises = vec![Exercise {
            name: "Pull-ups".into(),
            sets: Sets::Count(3),
            effort: Effort::Reps {
                target: RepTarget::Max,
                tempo: Tempo::PerRep(3),
            },
        }];
        let steps = build_timeline(&exercises, &TimingConfig::default());
        let mut edges = EdgeDetector::new();

        let cue = edges.observe_workout(&exercises, &steps, 0.0).unwrap();
        assert_eq!(cue.speech, "Start Pull-ups. Set 1 of 3. max reps.");
    }

    #[test]
    fn test_null_collaborators_are_noops() {
        let mut announcer = NullAnnouncer;
        announcer.speak("anything");
        announcer.cancel();
        let mut haptics = NullHaptics;
        haptics.vibrate(&Vibration::Single(400));
    }
}
