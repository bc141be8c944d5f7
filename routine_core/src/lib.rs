#![forbid(unsafe_code)]

//! Core domain model and scheduling logic for the Pacer daily-routine
//! tracker.
//!
//! This crate provides:
//! - Domain types (events, exercises, statuses)
//! - The static schedule catalog
//! - Time arithmetic and tick sources
//! - The schedule evaluator
//! - Workout timeline building and the step cursor
//! - Edge-triggered cue derivation
//! - Configuration and preference persistence

pub mod types;
pub mod error;
pub mod clock;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod state;
pub mod engine;
pub mod timeline;
pub mod cursor;
pub mod cues;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use clock::{FixedClock, SystemClock, TickSource};
pub use config::{Config, TimingConfig};
pub use cues::{Announcer, Cue, EdgeDetector, Haptics, NullAnnouncer, NullHaptics, Vibration};
pub use cursor::{display, locate, progress_percent, Cursor, PacePhase, StepDisplay};
pub use engine::{evaluate, Evaluation, NextByCategory, Upcoming};
pub use timeline::{build_timeline, total_seconds, StepKind, TimelineStep};
