//! Grid loading and validation errors.

use std::path::PathBuf;

use crate::pacing::PacingError;

/// Errors raised while loading or validating a course grid.
///
/// Every variant is terminal: a grid with any bad race or segment is
/// rejected as a whole.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Malformed quantity or unit label
    #[error(transparent)]
    Pacing(#[from] PacingError),

    /// The course's own total distance did not parse
    #[error("invalid distance for course grid: {0}")]
    InvalidTotalDistance(#[source] PacingError),

    /// A segment supplied too little or conflicting pacing data
    #[error("invalid course segment: (pace={pace}), (distance={distance}), (duration={duration})")]
    AmbiguousSegment {
        pace: String,
        distance: String,
        duration: String,
    },

    /// A segment failed to resolve; `race` and `segment` are 1-based
    #[error("race {race}, segment {segment}: {source}")]
    Segment {
        race: usize,
        segment: usize,
        #[source]
        source: Box<GridError>,
    },

    /// A race's segments reach or exceed the course totals
    #[error(
        "invalid race {race} in grid: course segments total {distance} and {duration} \
         where course totals {course_distance} and {course_duration}"
    )]
    RaceExceedsCourse {
        race: usize,
        distance: String,
        duration: String,
        course_distance: String,
        course_duration: String,
    },

    /// The document is not valid grid JSON
    #[error("invalid grid document: {0}")]
    Json(#[from] serde_json::Error),

    /// The grid file could not be read
    #[error("failed to read grid file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
