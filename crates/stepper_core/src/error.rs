//! Validation outcomes and configuration errors.

use thiserror::Error;

/// Why a value or an in-progress edit was rejected.
///
/// None of these are fatal: the stepper corrects the state locally (clamp,
/// truncate, or drop the keystroke) and reports the kind once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("text is not a plain decimal number")]
    IncorrectSymbols,
    #[error("value is above the maximum")]
    CrossedMax,
    #[error("value is below the minimum")]
    CrossedMin,
    #[error("value is not a multiple of the step")]
    NonMultiple,
}

/// Outcome of checking a complete value or text.
pub type Validity = Result<(), ErrorKind>;

/// Verdict on a proposed in-place edit of the field text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditDecision {
    /// Apply the edit as typed.
    Allow,
    /// Discard the edit and surface the error.
    Reject(ErrorKind),
    /// Discard the edit and force the field to this text. No error is surfaced.
    Rewrite(String),
}

/// Invalid stepper configuration. The previous configuration stays in effect.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    #[error("minimum {min} is greater than maximum {max}")]
    InvertedLimits { min: f64, max: f64 },
    #[error("limit must be finite, got {0}")]
    NonFiniteLimit(f64),
    #[error("value must be finite, got {0}")]
    NonFiniteValue(f64),
    #[error("{key} must be a whole number for an integer-only stepper, got {value}")]
    NotWholeNumber { key: &'static str, value: f64 },
    #[error("failed to parse stepper config: {0}")]
    Parse(#[from] toml::de::Error),
}
