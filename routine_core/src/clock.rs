//! Time arithmetic and tick sources.
//!
//! All schedule evaluation is a pure function of a wall-clock instant. The
//! tick source abstraction lets the host feed the real local clock or a
//! fixed/simulated one (debug override, tests) without the engine knowing.

use crate::TimeOfDay;
use chrono::{Local, NaiveDateTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const SECONDS_PER_DAY: u32 = MINUTES_PER_DAY * 60;

/// Minutes from midnight for an instant (0-1439).
pub fn minute_of_day(now: &NaiveDateTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Seconds from midnight for an instant (0-86399).
pub fn second_of_day(now: &NaiveDateTime) -> u32 {
    minute_of_day(now) * 60 + now.second()
}

/// Find the next occurrence strictly after `now_minutes` in a list of
/// times-of-day sorted ascending.
///
/// Returns the index and whether the search wrapped to the next day; when it
/// wrapped, callers add a full day (1440 minutes) to any countdown they
/// compute. `None` only for an empty list. Unsorted input gives unreliable
/// results; the catalog sorts at build time.
pub fn next_occurrence(times: &[TimeOfDay], now_minutes: u32) -> Option<(usize, bool)> {
    if times.is_empty() {
        return None;
    }
    match times.iter().position(|t| t.minutes() > now_minutes) {
        Some(index) => Some((index, false)),
        None => Some((0, true)),
    }
}

/// Source of "now" snapshots for the tick loop.
///
/// Implementations may be stateful (a simulated clock advances on each
/// call), hence `&mut self`.
pub trait TickSource {
    fn now(&mut self) -> NaiveDateTime;
}

/// The real local wall clock.
pub struct SystemClock;

impl TickSource for SystemClock {
    fn now(&mut self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A pinned instant, for one-shot evaluation at an arbitrary time.
pub struct FixedClock(pub NaiveDateTime);

impl TickSource for FixedClock {
    fn now(&mut self) -> NaiveDateTime {
        self.0
    }
}
