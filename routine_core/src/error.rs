//! Error types for the routine_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for routine_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schedule catalog validation error
    #[error("Schedule validation error: {0}")]
    ScheduleValidation(String),

    /// Lookup of a workout id that is not in the catalog
    #[error("Unknown workout: {0}")]
    UnknownWorkout(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
