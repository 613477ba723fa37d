//! Pacing error types.
//!
//! These errors cover parsing of human-entered quantities and the
//! arithmetic guards around pace calculation.

/// Errors raised while parsing or computing distances, durations and paces.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PacingError {
    /// Unit label not present in the registry
    #[error("invalid unit: {unit}. must use one of the following: {valid}")]
    UnknownUnit { unit: String, valid: String },

    /// Distance string without a recognised suffix or number
    #[error("invalid distance: {0}")]
    InvalidDistance(String),

    /// Duration string in an unrecognised format
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// Pace input that is neither duration-like nor a decimal rate
    #[error("invalid pace string {input:?}: {reason}")]
    InvalidPace { input: String, reason: String },

    /// Rate that cannot describe a physical pace
    #[error("invalid pace rate: {0} (must be finite and positive)")]
    InvalidRate(f64),

    /// Pace requested over a zero distance or zero time span
    #[error("cannot calculate a pace over {distance} in {duration}")]
    DegeneratePace { distance: String, duration: String },
}
