//! Course segments and their resolution.
//!
//! A segment is supplied with two of its three quantities. Resolution
//! derives the third:
//!
//! - pace + distance: duration = time to cover the distance at that pace
//! - pace + duration: distance = ground covered at that pace
//! - distance + duration: pace calculated from the two
//!
//! Any other combination is rejected.

use tracing::debug;

use crate::pacing::{Distance, Duration, Pace, PaceInput, PaceUnit};

use super::GridError;
use super::dto::{PaceField, SegmentDocument};

/// Which quantities a segment was supplied with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    PaceAndDistance,
    PaceAndDuration,
    DistanceAndDuration,
}

/// The supplied quantities of a segment, classified by resolution path.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentPlan {
    PaceAndDistance { pace: Pace, distance: Distance },
    PaceAndDuration { pace: Pace, duration: Duration },
    DistanceAndDuration {
        distance: Distance,
        duration: Duration,
        unit: PaceUnit,
    },
}

impl SegmentPlan {
    /// Classify raw segment data.
    ///
    /// `distance` is a bare number of `unit`'s reference distance. A
    /// distance or duration that is zero or negative counts as not
    /// supplied.
    pub fn classify(
        pace: Option<PaceInput>,
        distance: Option<f64>,
        duration: Option<Duration>,
        unit: PaceUnit,
    ) -> Result<Self, GridError> {
        let supplied_distance = distance.filter(|d| *d > 0.0);
        let supplied_duration = duration.filter(|d| *d > Duration::zero());

        match (pace, supplied_distance, supplied_duration) {
            (Some(pace), Some(distance), None) => Ok(SegmentPlan::PaceAndDistance {
                pace: Pace::from_input(pace, unit)?,
                distance: unit.distance(distance),
            }),
            (Some(pace), None, Some(duration)) => Ok(SegmentPlan::PaceAndDuration {
                pace: Pace::from_input(pace, unit)?,
                duration,
            }),
            (None, Some(distance), Some(duration)) => Ok(SegmentPlan::DistanceAndDuration {
                distance: unit.distance(distance),
                duration,
                unit,
            }),
            (pace, _, _) => Err(GridError::AmbiguousSegment {
                pace: pace.as_ref().map(describe_pace).unwrap_or_default(),
                distance: format!(
                    "{:.2} {}",
                    distance.unwrap_or(0.0),
                    unit.distance_unit().suffix()
                ),
                duration: duration.unwrap_or_default().to_string(),
            }),
        }
    }

    /// Classify a segment as written in a grid document.
    ///
    /// The segment's own `units` win over `race_unit`.
    pub fn from_document(doc: &SegmentDocument, race_unit: PaceUnit) -> Result<Self, GridError> {
        let unit = match doc.units.as_deref() {
            Some(label) => PaceUnit::parse(label)?,
            None => race_unit,
        };
        let pace = doc.pace.as_ref().and_then(PaceField::to_input);
        Self::classify(pace, doc.distance, doc.time, unit)
    }

    /// Derive the missing quantity.
    pub fn resolve(self) -> Result<CourseSegment, GridError> {
        let segment = match self {
            SegmentPlan::PaceAndDistance { pace, distance } => CourseSegment {
                pace,
                distance,
                duration: pace.duration(distance),
                resolution: Resolution::PaceAndDistance,
            },
            SegmentPlan::PaceAndDuration { pace, duration } => CourseSegment {
                pace,
                distance: pace.distance(duration),
                duration,
                resolution: Resolution::PaceAndDuration,
            },
            SegmentPlan::DistanceAndDuration {
                distance,
                duration,
                unit,
            } => CourseSegment {
                pace: Pace::calculate(duration, distance, unit)?,
                distance,
                duration,
                resolution: Resolution::DistanceAndDuration,
            },
        };

        debug!(
            resolution = ?segment.resolution,
            pace = %segment.pace,
            distance = %segment.unit().distance_string(segment.distance),
            duration = %segment.duration,
            "Resolved course segment"
        );

        Ok(segment)
    }
}

fn describe_pace(pace: &PaceInput) -> String {
    match pace {
        PaceInput::Rate(rate) => rate.to_string(),
        PaceInput::DurationLike(duration) => duration.to_string(),
        PaceInput::Text(text) => text.clone(),
    }
}

/// A fully resolved segment: pace, distance and duration are all known.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSegment {
    pace: Pace,
    distance: Distance,
    duration: Duration,
    resolution: Resolution,
}

impl CourseSegment {
    /// Resolve a segment as written in a grid document.
    pub fn from_document(doc: &SegmentDocument, race_unit: PaceUnit) -> Result<Self, GridError> {
        SegmentPlan::from_document(doc, race_unit)?.resolve()
    }

    /// A segment whose pace was derived from its distance and duration.
    pub(crate) fn derived(pace: Pace, distance: Distance, duration: Duration) -> Self {
        Self {
            pace,
            distance,
            duration,
            resolution: Resolution::DistanceAndDuration,
        }
    }

    /// The segment's (pace, distance, duration).
    pub fn stats(&self) -> (Pace, Distance, Duration) {
        (self.pace, self.distance, self.duration)
    }

    /// Returns the segment's pace.
    pub fn pace(&self) -> Pace {
        self.pace
    }

    /// Returns the distance the segment covers.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns the time the segment takes.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The segment's unit, which is its pace's unit.
    pub fn unit(&self) -> PaceUnit {
        self.pace.unit()
    }

    /// Which quantities were supplied rather than derived.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The segment as a document, carrying only the quantities that were
    /// supplied so it resolves the same way when read back.
    pub fn to_document(&self) -> SegmentDocument {
        let unit = self.unit();
        let pace = Some(PaceField::Text(if unit.is_speed() {
            self.pace.rate().to_string()
        } else {
            self.pace.to_string()
        }));
        let distance = Some(unit.distance_in_units(self.distance));
        let time = Some(self.duration);

        let (pace, distance, time) = match self.resolution {
            Resolution::PaceAndDistance => (pace, distance, None),
            Resolution::PaceAndDuration => (pace, None, time),
            Resolution::DistanceAndDuration => (None, distance, time),
        };

        SegmentDocument {
            pace,
            distance,
            time,
            units: Some(unit.label().to_string()),
        }
    }
}
