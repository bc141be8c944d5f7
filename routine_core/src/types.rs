//! Core domain types for the Pacer daily-routine tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Times of day and scheduled events (water, meal, workout)
//! - Exercise specifications (sets, effort, tempo)
//! - Derived status and optional-challenge values
//! - Durable user preferences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Time of Day
// ============================================================================

/// A wall-clock time of day (local time, no date attached).
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes from midnight (0-1439 for valid times).
    pub fn minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Seconds from midnight.
    pub fn seconds(&self) -> u32 {
        self.minutes() * 60
    }

    /// 12-hour clock rendering, e.g. "4:50 AM".
    pub fn twelve_hour(&self) -> String {
        let suffix = if self.hour >= 12 { "PM" } else { "AM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute, suffix)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// Category of a scheduled event
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Water,
    Meal,
    Workout,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Water => write!(f, "Water"),
            Category::Meal => write!(f, "Meal"),
            Category::Workout => write!(f, "Workout"),
        }
    }
}

/// Payload carried by a scheduled event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    /// Free-text detail for water and meal events
    Note(String),
    /// Ordered exercise list for workout events
    Exercises(Vec<Exercise>),
}

impl EventPayload {
    pub fn exercises(&self) -> Option<&[Exercise]> {
        match self {
            EventPayload::Exercises(list) => Some(list),
            EventPayload::Note(_) => None,
        }
    }

    /// One-line rendering for schedule listings and next-up cards.
    pub fn summary(&self) -> String {
        match self {
            EventPayload::Note(text) => text.clone(),
            EventPayload::Exercises(list) => match list.first() {
                Some(first) => format!("Workout - {}", first.name),
                None => "Workout".to_string(),
            },
        }
    }
}

/// A scheduled daily event, pinned to a time of day
///
/// Events are defined once at process start from the static catalog and are
/// never mutated. The same definitions apply every day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub id: String,
    pub category: Category,
    pub start: TimeOfDay,
    /// Present only for workout events
    pub end: Option<TimeOfDay>,
    pub payload: EventPayload,
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Set count for an exercise: a fixed count or an inclusive range
///
/// Only the upper bound of a range determines the repeat count; the range
/// form exists because plans are often written as "2-3 sets".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sets {
    Count(u32),
    Range { low: u32, high: u32 },
}

impl Sets {
    /// The number of sets actually scheduled (upper bound for ranges).
    pub fn total(&self) -> u32 {
        match self {
            Sets::Count(n) => *n,
            Sets::Range { high, .. } => *high,
        }
    }
}

impl FromStr for Sets {
    type Err = crate::Error;

    /// Parses "3" or an ascending range like "2-3".
    fn from_str(s: &str) -> crate::Result<Self> {
        let s = s.trim();
        if let Some((low, high)) = s.split_once('-') {
            let parse = |part: &str| {
                part.trim().parse::<u32>().map_err(|_| {
                    crate::Error::ScheduleValidation(format!(
                        "set range '{}' has a non-numeric bound",
                        s
                    ))
                })
            };
            let (low, high) = (parse(low)?, parse(high)?);
            if low == 0 || high < low {
                return Err(crate::Error::ScheduleValidation(format!(
                    "set range '{}' must be ascending and positive",
                    s
                )));
            }
            Ok(Sets::Range { low, high })
        } else {
            let n = s.parse::<u32>().map_err(|_| {
                crate::Error::ScheduleValidation(format!("set count '{}' is not a number", s))
            })?;
            if n == 0 {
                return Err(crate::Error::ScheduleValidation(
                    "set count must be positive".into(),
                ));
            }
            Ok(Sets::Count(n))
        }
    }
}

/// Rep target within one set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepTarget {
    Count(u32),
    /// Operator-paced, uncounted ("max" in the written plan)
    Max,
}

/// Per-rep pacing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    /// Tempo reps with an up phase and a down phase
    UpDown { up_seconds: u32, down_seconds: u32 },
    /// Flat per-rep duration
    PerRep(u32),
    /// No pacing declared; callers supply the fallback per-rep time
    Default,
}

impl Tempo {
    /// Seconds one rep takes under this tempo.
    pub fn per_rep_seconds(&self, default_rep_seconds: u32) -> u32 {
        match self {
            Tempo::UpDown {
                up_seconds,
                down_seconds,
            } => up_seconds + down_seconds,
            Tempo::PerRep(seconds) => *seconds,
            Tempo::Default => default_rep_seconds,
        }
    }

    /// Human label for tempo reps, e.g. "2s up, 2s down". Only up/down
    /// tempos are worth announcing.
    pub fn describe(&self) -> Option<String> {
        match self {
            Tempo::UpDown {
                up_seconds,
                down_seconds,
            } => Some(format!("{}s up, {}s down", up_seconds, down_seconds)),
            _ => None,
        }
    }
}

/// How a single set is performed
///
/// The sum type makes duration-vs-reps mutual exclusivity structural:
/// a timed set (plank, stretch) has no rep target, a rep set has no fixed
/// duration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effort {
    Timed { seconds: u32 },
    Reps { target: RepTarget, tempo: Tempo },
}

/// An exercise within a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub sets: Sets,
    pub effort: Effort,
}

// ============================================================================
// Derived Status Types
// ============================================================================

/// Discriminator for the global status, in priority order
///
/// Consumers key UI selection and edge-triggered alerts on this field;
/// the message is pre-rendered display text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    WorkoutActive,
    ActionNowWater,
    ActionNowMeal,
    WorkoutPrep,
    MealPrep,
    WaterPrep,
    Resting,
}

/// Snapshot of what the user should be doing right now
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// State of the recurring optional-challenge prompt
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChallengeStatus {
    Inactive,
    /// Minutes until the next trigger window opens (fractional)
    Countdown { minutes: f64 },
    /// Inside a trigger's 40-second prompt window
    Prompt,
}

// ============================================================================
// User Preferences
// ============================================================================

/// Durable user preferences
///
/// Read once at startup and written on every change. Audio defaults to
/// enabled when no preference has been stored yet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPrefs {
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            audio_enabled: default_audio_enabled(),
        }
    }
}

fn default_audio_enabled() -> bool {
    true
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete static schedule: daily events, optional-challenge triggers,
/// and the challenge exercise itself
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Sorted ascending by start time
    pub events: Vec<ScheduleEvent>,
    /// Sorted ascending; each opens a 40-second prompt window
    pub challenge_times: Vec<TimeOfDay>,
    pub challenge_exercise: Exercise,
}
