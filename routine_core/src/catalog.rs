//! The built-in daily schedule: water, meals, workouts, and the
//! optional-challenge triggers.
//!
//! The catalog is defined once in code, sorted defensively at build time,
//! and never mutated for the lifetime of the process.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn water(id: &str, hour: u32, minute: u32, note: &str) -> ScheduleEvent {
    ScheduleEvent {
        id: id.into(),
        category: Category::Water,
        start: TimeOfDay::new(hour, minute),
        end: None,
        payload: EventPayload::Note(note.into()),
    }
}

fn meal(id: &str, hour: u32, minute: u32, note: &str) -> ScheduleEvent {
    ScheduleEvent {
        id: id.into(),
        category: Category::Meal,
        start: TimeOfDay::new(hour, minute),
        end: None,
        payload: EventPayload::Note(note.into()),
    }
}

fn workout(id: &str, start: (u32, u32), end: (u32, u32), exercises: Vec<Exercise>) -> ScheduleEvent {
    ScheduleEvent {
        id: id.into(),
        category: Category::Workout,
        start: TimeOfDay::new(start.0, start.1),
        end: Some(TimeOfDay::new(end.0, end.1)),
        payload: EventPayload::Exercises(exercises),
    }
}

fn timed(name: &str, sets: u32, seconds: u32) -> Exercise {
    Exercise {
        name: name.into(),
        sets: Sets::Count(sets),
        effort: Effort::Timed { seconds },
    }
}

fn reps(name: &str, sets: Sets, target: RepTarget, tempo: Tempo) -> Exercise {
    Exercise {
        name: name.into(),
        sets,
        effort: Effort::Reps { target, tempo },
    }
}

fn build_default_catalog_internal() -> Catalog {
    let tempo_2_2 = Tempo::UpDown {
        up_seconds: 2,
        down_seconds: 2,
    };

    let morning_workout = vec![
        reps("Pull-ups", Sets::Count(3), RepTarget::Max, Tempo::PerRep(3)),
        reps("V-ups", Sets::Count(2), RepTarget::Count(20), tempo_2_2),
        timed("Planks", 2, 60),
        timed("Stretch", 1, 180),
    ];

    let midday_workout = vec![
        reps("V-ups", Sets::Count(3), RepTarget::Count(20), tempo_2_2),
        reps(
            "Leg raises",
            Sets::Count(3),
            RepTarget::Count(15),
            Tempo::PerRep(3),
        ),
        timed("Hollow holds", 2, 30),
        timed("Planks", 2, 60),
    ];

    let evening_workout = vec![
        reps(
            "Pull-ups",
            Sets::Range { low: 2, high: 3 },
            RepTarget::Max,
            Tempo::PerRep(3),
        ),
        reps(
            "Hanging leg raises",
            Sets::Count(3),
            RepTarget::Count(12),
            Tempo::PerRep(3),
        ),
        reps(
            "Light squats (optional)",
            Sets::Count(2),
            RepTarget::Count(20),
            Tempo::PerRep(2),
        ),
        timed("Stretch + cooldown", 1, 300),
    ];

    let mut events = vec![
        // Water schedule
        water("w1", 3, 30, "Drink 250 ml (before morning workout)"),
        water("w2", 4, 45, "Drink 250 ml (after morning workout)"),
        water("w3", 7, 30, "Drink 250 ml (at school)"),
        water("w4", 9, 30, "Drink 250 ml (at school)"),
        water("w5", 10, 45, "Drink 250 ml (after school)"),
        water("w6", 13, 15, "Drink 250 ml"),
        water("w7", 14, 45, "Drink 250 ml"),
        water("w8", 16, 15, "Drink 250 ml (before evening workout)"),
        water("w9", 18, 30, "Drink 250 ml (after evening workout)"),
        water("w10", 19, 45, "Drink 250 ml (with dinner)"),
        water("w11", 21, 15, "Drink 125 ml (before bed)"),
        // Meal schedule
        meal("m1", 3, 45, "Ensure + 240 ml milk + 2 boiled eggs"),
        meal("m2", 10, 40, "Rice + dal + vegetables"),
        meal("m3", 13, 30, "1 boiled egg + 120 ml milk"),
        meal("m4", 16, 45, "2 sukha roti + honey"),
        meal("m5", 19, 15, "3 bread slices + 1 boiled egg"),
        meal("m6", 20, 45, "Rice + dal + vegetables (light meal)"),
        // Workout schedule
        workout("wo1", (4, 0), (5, 15), morning_workout),
        workout("wo2", (10, 45), (11, 30), midday_workout),
        workout("wo3", (17, 30), (18, 30), evening_workout),
    ];
    events.sort_by_key(|e| e.start.minutes());

    let mut challenge_times = vec![
        TimeOfDay::new(4, 50),
        TimeOfDay::new(10, 35),
        TimeOfDay::new(12, 0),
        TimeOfDay::new(13, 0),
        TimeOfDay::new(14, 0),
        TimeOfDay::new(15, 0),
        TimeOfDay::new(16, 0),
        TimeOfDay::new(19, 30),
    ];
    challenge_times.sort_by_key(|t| t.minutes());

    Catalog {
        events,
        challenge_times,
        challenge_exercise: reps(
            "V-ups",
            Sets::Count(1),
            RepTarget::Count(20),
            Tempo::Default,
        ),
    }
}

impl Catalog {
    /// Look up a workout event by id.
    pub fn workout_by_id(&self, id: &str) -> Option<&ScheduleEvent> {
        self.events
            .iter()
            .find(|e| e.category == Category::Workout && e.id == id)
    }

    /// Ids of all workout events, in schedule order.
    pub fn workout_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.category == Category::Workout)
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen_ids = std::collections::HashSet::new();
        for event in &self.events {
            if event.id.is_empty() {
                errors.push("Event has empty ID".to_string());
            }
            if !seen_ids.insert(event.id.as_str()) {
                errors.push(format!("Duplicate event ID '{}'", event.id));
            }

            match event.category {
                Category::Workout => {
                    match event.end {
                        None => errors.push(format!("Workout '{}' has no end time", event.id)),
                        Some(end) if end.minutes() <= event.start.minutes() => errors.push(
                            format!("Workout '{}' ends at or before its start", event.id),
                        ),
                        Some(_) => {}
                    }
                    match event.payload.exercises() {
                        None => errors.push(format!(
                            "Workout '{}' does not carry an exercise list",
                            event.id
                        )),
                        Some([]) => {
                            errors.push(format!("Workout '{}' has no exercises", event.id))
                        }
                        Some(list) => {
                            for exercise in list {
                                validate_exercise(&event.id, exercise, &mut errors);
                            }
                        }
                    }
                }
                Category::Water | Category::Meal => {
                    if event.end.is_some() {
                        errors.push(format!(
                            "{} event '{}' must not have an end time",
                            event.category, event.id
                        ));
                    }
                    match &event.payload {
                        EventPayload::Note(text) if text.is_empty() => {
                            errors.push(format!("Event '{}' has an empty note", event.id))
                        }
                        EventPayload::Note(_) => {}
                        EventPayload::Exercises(_) => errors.push(format!(
                            "{} event '{}' must carry a note, not exercises",
                            event.category, event.id
                        )),
                    }
                }
            }
        }

        // Next-occurrence search relies on sorted input.
        if self
            .events
            .windows(2)
            .any(|w| w[0].start.minutes() > w[1].start.minutes())
        {
            errors.push("Events are not sorted by start time".to_string());
        }
        if self
            .challenge_times
            .windows(2)
            .any(|w| w[0].minutes() > w[1].minutes())
        {
            errors.push("Challenge triggers are not sorted".to_string());
        }

        validate_exercise("challenge", &self.challenge_exercise, &mut errors);

        errors
    }
}

fn validate_exercise(owner: &str, exercise: &Exercise, errors: &mut Vec<String>) {
    if exercise.name.is_empty() {
        errors.push(format!("'{}': exercise has an empty name", owner));
    }
    if exercise.sets.total() == 0 {
        errors.push(format!(
            "'{}': exercise '{}' has zero sets",
            owner, exercise.name
        ));
    }
    match &exercise.effort {
        Effort::Timed { seconds: 0 } => errors.push(format!(
            "'{}': timed exercise '{}' has zero duration",
            owner, exercise.name
        )),
        Effort::Timed { .. } => {}
        Effort::Reps { target, tempo } => {
            if let RepTarget::Count(0) = target {
                errors.push(format!(
                    "'{}': exercise '{}' has zero reps",
                    owner, exercise.name
                ));
            }
            // Zero-length reps would make rep counting divide by zero.
            match tempo {
                Tempo::PerRep(0) => errors.push(format!(
                    "'{}': exercise '{}' has a zero-second rep",
                    owner, exercise.name
                )),
                Tempo::UpDown {
                    up_seconds: 0,
                    down_seconds: 0,
                } => errors.push(format!(
                    "'{}': exercise '{}' has a zero-second tempo",
                    owner, exercise.name
                )),
                _ => {}
            }
        }
    }
}
