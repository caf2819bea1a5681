//! Configuration errors

use thiserror::Error;

/// Errors raised while loading or validating generation options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing value for option: {0}")]
    MissingValue(String),

    #[error("Invalid value for option {0}: {1}")]
    InvalidValue(String, String),

    #[error("Probability {name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Range {name} is inverted: {min} > {max}")]
    InvertedRange {
        name: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Difficulty modifier {0} is outside [0.5, 1.5]")]
    DifficultyOutOfRange(f64),
}
