//! Schedule evaluation: what to do right now, what is next, and whether a
//! workout or an optional challenge is active.
//!
//! `evaluate` is a pure function of the catalog and a wall-clock instant; it
//! is called once per tick and returns a fresh snapshot every time. Status
//! priority, evaluated in order:
//! 1. Active workout
//! 2. Instant water/meal action (5-second trigger window)
//! 3. Prep warnings (workout, then meal, then water; 2-minute lead)
//! 4. Resting with a countdown to the nearest event
//! 5. Resting with nothing left

use crate::clock::{minute_of_day, next_occurrence, second_of_day, SECONDS_PER_DAY};
use crate::{Catalog, Category, ChallengeStatus, ScheduleEvent, Status, StatusKind};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Instant water/meal notifications stay visible for this many seconds so a
/// 1 Hz poll cannot miss them.
pub const ACTION_WINDOW_SECONDS: u32 = 5;

/// Lead time for "get ready" prep statuses, in minutes.
pub const PREP_WINDOW_MINUTES: f64 = 2.0;

/// Length of each optional-challenge prompt window, in seconds.
pub const CHALLENGE_WINDOW_SECONDS: u32 = 40;

/// The next occurrence of an event, possibly tomorrow
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Upcoming<'a> {
    pub event: &'a ScheduleEvent,
    /// 0 = later today, 1 = tomorrow
    pub day_offset: u32,
    pub seconds_until: i64,
}

impl Upcoming<'_> {
    pub fn minutes_until(&self) -> f64 {
        self.seconds_until as f64 / 60.0
    }
}

/// Next occurrence per category
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct NextByCategory<'a> {
    pub water: Option<Upcoming<'a>>,
    pub meal: Option<Upcoming<'a>>,
    pub workout: Option<Upcoming<'a>>,
}

impl<'a> NextByCategory<'a> {
    /// The soonest of the three, for the resting countdown.
    pub fn nearest(&self) -> Option<Upcoming<'a>> {
        [self.workout, self.meal, self.water]
            .into_iter()
            .flatten()
            .min_by_key(|u| u.seconds_until)
    }
}

/// One evaluated snapshot
#[derive(Clone, Debug, Serialize)]
pub struct Evaluation<'a> {
    pub status: Status,
    pub next: NextByCategory<'a>,
    pub active_workout: Option<&'a ScheduleEvent>,
    pub challenge: ChallengeStatus,
}

/// Evaluate the schedule at an instant.
pub fn evaluate(catalog: &Catalog, now: NaiveDateTime) -> Evaluation<'_> {
    let now_minutes = minute_of_day(&now);
    let now_seconds = second_of_day(&now);

    let next = NextByCategory {
        water: next_in_category(catalog, Category::Water, now_minutes, now_seconds),
        meal: next_in_category(catalog, Category::Meal, now_minutes, now_seconds),
        workout: next_in_category(catalog, Category::Workout, now_minutes, now_seconds),
    };

    let active_workout = find_active_workout(catalog, now_minutes);
    let status = compute_status(catalog, &next, active_workout.is_some(), now_minutes, now.second());
    let challenge = challenge_status(catalog, now_minutes, now_seconds);

    Evaluation {
        status,
        next,
        active_workout,
        challenge,
    }
}

/// The workout whose [start, end) interval contains this minute, if any.
///
/// At most one workout is expected to be active; should two overlap, the
/// first in catalog order wins.
pub fn find_active_workout(catalog: &Catalog, now_minutes: u32) -> Option<&ScheduleEvent> {
    catalog.events.iter().find(|e| {
        e.category == Category::Workout
            && match e.end {
                Some(end) => now_minutes >= e.start.minutes() && now_minutes < end.minutes(),
                None => false,
            }
    })
}

fn next_in_category<'a>(
    catalog: &'a Catalog,
    category: Category,
    now_minutes: u32,
    now_seconds: u32,
) -> Option<Upcoming<'a>> {
    // Later today: the catalog is sorted, so the first strictly-later event
    // of the category is the next one.
    if let Some(event) = catalog
        .events
        .iter()
        .find(|e| e.category == category && e.start.minutes() > now_minutes)
    {
        return Some(Upcoming {
            event,
            day_offset: 0,
            seconds_until: event.start.seconds() as i64 - now_seconds as i64,
        });
    }

    // Wrapped: the category's first event tomorrow.
    catalog
        .events
        .iter()
        .find(|e| e.category == category)
        .map(|event| Upcoming {
            event,
            day_offset: 1,
            seconds_until: (event.start.seconds() + SECONDS_PER_DAY) as i64 - now_seconds as i64,
        })
}

fn compute_status(
    catalog: &Catalog,
    next: &NextByCategory<'_>,
    workout_active: bool,
    now_minutes: u32,
    current_second: u32,
) -> Status {
    if workout_active {
        return Status {
            kind: StatusKind::WorkoutActive,
            message: "Workout in progress...".into(),
        };
    }

    // Instant notifications for events starting this very minute.
    if current_second < ACTION_WINDOW_SECONDS {
        let instant = catalog.events.iter().find(|e| {
            matches!(e.category, Category::Water | Category::Meal)
                && e.start.minutes() == now_minutes
        });
        if let Some(event) = instant {
            return match event.category {
                Category::Water => Status {
                    kind: StatusKind::ActionNowWater,
                    message: "Drink water now".into(),
                },
                _ => Status {
                    kind: StatusKind::ActionNowMeal,
                    message: "Time to eat".into(),
                },
            };
        }
    }

    // Prep warnings, highest-stakes category first.
    let prep_order = [
        (next.workout, StatusKind::WorkoutPrep, "Workout"),
        (next.meal, StatusKind::MealPrep, "Meal"),
        (next.water, StatusKind::WaterPrep, "Water"),
    ];
    for (upcoming, kind, noun) in prep_order {
        if let Some(upcoming) = upcoming {
            let minutes = upcoming.minutes_until();
            if minutes > 0.0 && minutes <= PREP_WINDOW_MINUTES {
                return Status {
                    kind,
                    message: format!("{} in {} min. Get ready!", noun, minutes.ceil() as i64),
                };
            }
        }
    }

    if let Some(nearest) = next.nearest() {
        let hours = nearest.seconds_until / 3600;
        let minutes = (nearest.seconds_until % 3600) / 60;
        return Status {
            kind: StatusKind::Resting,
            message: format!("On rest. Next up in {}h {}m.", hours, minutes),
        };
    }

    Status {
        kind: StatusKind::Resting,
        message: "All tasks done for the day!".into(),
    }
}

fn challenge_status(catalog: &Catalog, now_minutes: u32, now_seconds: u32) -> ChallengeStatus {
    // Prompt while inside any trigger's window. Overlapping windows are not
    // expected; the last matching trigger wins.
    let in_window = catalog.challenge_times.iter().rev().any(|t| {
        let start = t.seconds();
        now_seconds >= start && now_seconds < start + CHALLENGE_WINDOW_SECONDS
    });
    if in_window {
        return ChallengeStatus::Prompt;
    }

    let Some((index, wrapped)) = next_occurrence(&catalog.challenge_times, now_minutes) else {
        return ChallengeStatus::Inactive;
    };
    let mut target_seconds = catalog.challenge_times[index].seconds();
    if wrapped {
        target_seconds += SECONDS_PER_DAY;
    }

    ChallengeStatus::Countdown {
        minutes: (target_seconds as f64 - now_seconds as f64) / 60.0,
    }
}
