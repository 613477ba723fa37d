//! Races and the course grid.
//!
//! A `CourseGrid` is only ever constructed through validation: every race
//! must total strictly less distance and strictly less time than the
//! course. A grid that exists is therefore internally consistent.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::pacing::{Distance, Duration, Pace, PaceUnit};

use super::GridError;
use super::dto::{GridDocument, RaceDocument};
use super::segment::CourseSegment;

/// An ordered plan of segments sharing a unit context.
#[derive(Debug, Clone, PartialEq)]
pub struct Race {
    unit: PaceUnit,
    segments: Vec<CourseSegment>,
}

impl Race {
    /// Create a race from already-resolved segments.
    pub fn new(unit: PaceUnit, segments: Vec<CourseSegment>) -> Self {
        Self { unit, segments }
    }

    /// Resolve every segment of a race document, in order.
    ///
    /// `race` is the 1-based position used in error messages.
    pub fn from_document(doc: &RaceDocument, race: usize) -> Result<Self, GridError> {
        let unit = PaceUnit::parse(&doc.units)?;
        let segments = doc
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                CourseSegment::from_document(segment, unit).map_err(|e| GridError::Segment {
                    race,
                    segment: i + 1,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { unit, segments })
    }

    /// Returns the unit the race is reported in.
    pub fn unit(&self) -> PaceUnit {
        self.unit
    }

    /// Returns the resolved segments, in order.
    pub fn segments(&self) -> &[CourseSegment] {
        &self.segments
    }

    /// Total distance and time of the race's segments.
    pub fn totals(&self) -> (Distance, Duration) {
        let mut distance = Distance::zero();
        let mut duration = Duration::zero();
        for segment in &self.segments {
            let (_, d, t) = segment.stats();
            distance += d;
            duration += t;
        }
        (distance, duration)
    }

    /// Convert back to a race document.
    pub fn to_document(&self) -> RaceDocument {
        RaceDocument {
            units: self.unit.label().to_string(),
            segments: self.segments.iter().map(CourseSegment::to_document).collect(),
        }
    }
}

/// The root of a pacing plan: course totals and the races run against them.
///
/// # Examples
///
/// ```
/// use race_grid::grid::CourseGrid;
///
/// let grid = CourseGrid::from_json(r#"{
///     "totalDistance": "10km",
///     "totalTime": "1:00:00",
///     "races": [
///         { "units": "min/km", "segments": [ { "pace": "5:00", "distance": 5 } ] }
///     ]
/// }"#).unwrap();
///
/// let remaining = grid.remaining_segment(&grid.races()[0]).unwrap();
/// assert_eq!(remaining.duration().to_string(), "35:00");
/// assert_eq!(remaining.pace().to_string(), "7:00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGrid {
    total_distance_text: String,
    total_distance: Distance,
    total_duration: Duration,
    races: Vec<Race>,
}

impl CourseGrid {
    /// Build a grid, rejecting it if any race reaches the course totals.
    pub fn new(
        total_distance: &str,
        total_duration: Duration,
        races: Vec<Race>,
    ) -> Result<Self, GridError> {
        let course_distance =
            Distance::parse(total_distance).map_err(GridError::InvalidTotalDistance)?;

        for (i, race) in races.iter().enumerate() {
            validate_race(i + 1, race, course_distance, total_duration)?;
        }

        Ok(Self {
            total_distance_text: total_distance.to_string(),
            total_distance: course_distance,
            total_duration,
            races,
        })
    }

    /// Resolve and validate a parsed grid document.
    pub fn from_document(doc: GridDocument) -> Result<Self, GridError> {
        let races = doc
            .races
            .iter()
            .enumerate()
            .map(|(i, race)| Race::from_document(race, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(&doc.total_distance, doc.total_time, races)
    }

    /// Parse, resolve and validate grid JSON.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Parse, resolve and validate grid JSON from a byte stream.
    pub fn from_reader(reader: impl Read) -> Result<Self, GridError> {
        Self::from_document(serde_json::from_reader(reader)?)
    }

    /// Load a grid file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = Self::from_json(&contents)?;

        info!(
            path = %path.display(),
            races = grid.races.len(),
            "Loaded pacing grid"
        );

        Ok(grid)
    }

    /// The course distance as written in the document.
    pub fn total_distance_text(&self) -> &str {
        &self.total_distance_text
    }

    /// Returns the parsed course distance.
    pub fn total_distance(&self) -> Distance {
        self.total_distance
    }

    /// Returns the course time limit.
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Returns the validated races, in document order.
    pub fn races(&self) -> &[Race] {
        &self.races
    }

    /// The segment still to run after `race`: the distance left, the time
    /// left, and the pace needed to cover one in the other.
    pub fn remaining_segment(&self, race: &Race) -> Result<CourseSegment, GridError> {
        let (completed, elapsed) = race.totals();
        let distance = self.total_distance - completed;
        let duration = self.total_duration.saturating_sub(elapsed);
        let pace = Pace::calculate(duration, distance, race.unit())?;

        Ok(CourseSegment::derived(pace, distance, duration))
    }

    /// Convert back to a grid document.
    pub fn to_document(&self) -> GridDocument {
        GridDocument {
            total_distance: self.total_distance_text.clone(),
            total_time: self.total_duration,
            races: self.races.iter().map(Race::to_document).collect(),
        }
    }

    /// Serialize the grid back to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}

/// Reject a race whose totals meet or exceed the course's.
fn validate_race(
    race_number: usize,
    race: &Race,
    course_distance: Distance,
    course_duration: Duration,
) -> Result<(), GridError> {
    let (distance, duration) = race.totals();

    debug!(
        race = race_number,
        segments = race.segments().len(),
        distance = %race.unit().distance_string(distance),
        duration = %duration,
        "Race totals"
    );

    if distance < course_distance && duration < course_duration {
        return Ok(());
    }

    let unit = race.unit();
    Err(GridError::RaceExceedsCourse {
        race: race_number,
        distance: unit.distance_string(distance),
        duration: duration.to_string(),
        course_distance: unit.distance_string(course_distance),
        course_duration: course_duration.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Resolution;
    use crate::pacing::PacingError;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn dur(s: &str) -> Duration {
        Duration::parse(s).unwrap()
    }

    const MARATHON: &str = r#"{
        "totalDistance": "26.2mi",
        "totalTime": "4:00:00",
        "races": [
            {
                "units": "min/mile",
                "segments": [
                    { "pace": "9:00", "distance": 10 },
                    { "pace": "8:45", "time": "1:00:00" }
                ]
            },
            {
                "units": "kph",
                "segments": [
                    { "distance": 21.1, "time": "1:55:00" }
                ]
            }
        ]
    }"#;

    #[test]
    fn load_valid_grid() {
        let grid = CourseGrid::from_json(MARATHON).unwrap();

        assert_eq!(grid.total_distance_text(), "26.2mi");
        assert_relative_eq!(grid.total_distance().miles(), 26.2, max_relative = 1e-12);
        assert_eq!(grid.total_duration(), dur("4:00:00"));
        assert_eq!(grid.races().len(), 2);

        let first = &grid.races()[0];
        assert_eq!(first.unit(), PaceUnit::MinPerMile);
        assert_eq!(first.segments().len(), 2);
        assert_eq!(first.segments()[0].duration(), dur("1:30:00"));
        assert_relative_eq!(
            first.segments()[1].distance().miles(),
            60.0 / 8.75,
            max_relative = 1e-9
        );

        let second = &grid.races()[1];
        assert_eq!(second.unit(), PaceUnit::Kph);
        assert_eq!(
            second.segments()[0].resolution(),
            Resolution::DistanceAndDuration
        );
    }

    #[test]
    fn race_totals_accumulate_every_segment() {
        let grid = CourseGrid::from_json(MARATHON).unwrap();
        let (distance, duration) = grid.races()[0].totals();

        assert_relative_eq!(distance.miles(), 10.0 + 60.0 / 8.75, max_relative = 1e-9);
        assert_eq!(duration, dur("2:30:00"));
    }

    #[test]
    fn race_reaching_course_distance_is_rejected() {
        let json = r#"{
            "totalDistance": "26.2mi",
            "totalTime": "4:00:00",
            "races": [
                {
                    "units": "min/mile",
                    "segments": [
                        { "pace": "9:00", "distance": 13.1 },
                        { "pace": "9:00", "distance": 13.1 }
                    ]
                }
            ]
        }"#;

        let err = CourseGrid::from_json(json).unwrap_err();
        let message = err.to_string();
        assert!(
            message.starts_with("invalid race 1 in grid: course segments total 26.20 mi and 3:55:")
        );
        assert!(message.ends_with("where course totals 26.20 mi and 4:00:00"));
    }

    #[test]
    fn race_reaching_course_time_is_rejected() {
        let json = r#"{
            "totalDistance": "10km",
            "totalTime": "1:00:00",
            "races": [
                {
                    "units": "min/km",
                    "segments": [
                        { "pace": "7:00", "time": "30:00" },
                        { "pace": "7:00", "time": "30:00" }
                    ]
                }
            ]
        }"#;

        let err = CourseGrid::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            GridError::RaceExceedsCourse { race: 1, .. }
        ));
    }

    #[test]
    fn one_bad_race_rejects_the_whole_grid() {
        let json = r#"{
            "totalDistance": "5km",
            "totalTime": "30:00",
            "races": [
                { "units": "min/km", "segments": [ { "pace": "5:00", "distance": 1 } ] },
                { "units": "kph", "segments": [ { "pace": "12", "distance": 6 } ] }
            ]
        }"#;

        let err = CourseGrid::from_json(json).unwrap_err();
        match err {
            GridError::RaceExceedsCourse {
                race,
                distance,
                duration,
                course_distance,
                course_duration,
            } => {
                assert_eq!(race, 2);
                assert_eq!(distance, "6.00 km");
                assert_eq!(duration, "30:00");
                assert_eq!(course_distance, "5.00 km");
                assert_eq!(course_duration, "30:00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_segment_is_ambiguous_not_a_panic() {
        let json = r#"{
            "totalDistance": "10km",
            "totalTime": "1:00:00",
            "races": [
                { "units": "min/km", "segments": [ { "pace": "", "distance": 0, "time": "" } ] }
            ]
        }"#;

        let err = CourseGrid::from_json(json).unwrap_err();
        let GridError::Segment {
            race,
            segment,
            source,
        } = err
        else {
            panic!("expected a segment error");
        };
        assert_eq!((race, segment), (1, 1));
        assert!(matches!(*source, GridError::AmbiguousSegment { .. }));
    }

    #[test]
    fn segment_errors_carry_their_position() {
        let json = r#"{
            "totalDistance": "10km",
            "totalTime": "1:00:00",
            "races": [
                { "units": "min/km", "segments": [ { "pace": "5:00", "distance": 1 } ] },
                {
                    "units": "min/km",
                    "segments": [
                        { "pace": "5:00", "distance": 1 },
                        { "pace": "sprint", "distance": 1 }
                    ]
                }
            ]
        }"#;

        let err = CourseGrid::from_json(json).unwrap_err();
        assert!(err.to_string().starts_with("race 2, segment 2: invalid pace string"));
    }

    #[test]
    fn invalid_documents() {
        let bad_total = r#"{ "totalDistance": "26.2", "totalTime": "4:00:00", "races": [] }"#;
        assert!(matches!(
            CourseGrid::from_json(bad_total),
            Err(GridError::InvalidTotalDistance(_))
        ));

        let bad_units = r#"{
            "totalDistance": "10km",
            "totalTime": "1:00:00",
            "races": [ { "units": "leagues", "segments": [] } ]
        }"#;
        assert!(matches!(
            CourseGrid::from_json(bad_units),
            Err(GridError::Pacing(PacingError::UnknownUnit { .. }))
        ));

        assert!(matches!(
            CourseGrid::from_json("not json"),
            Err(GridError::Json(_))
        ));
    }

    #[test]
    fn grid_without_races_is_valid() {
        let grid = CourseGrid::new("5km", dur("25:00"), vec![]).unwrap();
        assert!(grid.races().is_empty());
    }

    #[test]
    fn remaining_segment_covers_the_rest_of_the_course() {
        let grid = CourseGrid::from_json(MARATHON).unwrap();
        let race = &grid.races()[0];
        let remaining = grid.remaining_segment(race).unwrap();

        let (completed, elapsed) = race.totals();
        assert_relative_eq!(
            remaining.distance().miles(),
            26.2 - completed.miles(),
            max_relative = 1e-9
        );
        assert_eq!(remaining.duration(), dur("4:00:00").saturating_sub(elapsed));
        assert_eq!(remaining.duration(), dur("1:30:00"));
        assert_eq!(remaining.unit(), PaceUnit::MinPerMile);

        // The remaining pace covers the remaining distance in the remaining time
        let covered = remaining.pace().distance(remaining.duration());
        assert_relative_eq!(
            covered.miles(),
            remaining.distance().miles(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn remaining_segment_in_speed_units() {
        let grid = CourseGrid::from_json(MARATHON).unwrap();
        let remaining = grid.remaining_segment(&grid.races()[1]).unwrap();

        assert_eq!(remaining.unit(), PaceUnit::Kph);
        assert_eq!(remaining.duration(), dur("2:05:00"));
        let expected_kph = (26.2 * 1.609_344 - 21.1) / (125.0 / 60.0);
        assert_relative_eq!(remaining.pace().rate(), expected_kph, max_relative = 1e-9);
    }

    #[test]
    fn json_roundtrip_preserves_the_grid() {
        let grid = CourseGrid::from_json(MARATHON).unwrap();
        let json = grid.to_json().unwrap();
        let reread = CourseGrid::from_json(&json).unwrap();

        assert_eq!(reread.total_distance_text(), grid.total_distance_text());
        assert_eq!(reread.total_duration(), grid.total_duration());
        assert_eq!(reread.races().len(), grid.races().len());

        for (a, b) in grid.races().iter().zip(reread.races()) {
            assert_eq!(a.unit(), b.unit());
            for (x, y) in a.segments().iter().zip(b.segments()) {
                assert_eq!(x.resolution(), y.resolution());
                assert_relative_eq!(
                    x.distance().millimeters(),
                    y.distance().millimeters(),
                    max_relative = 1e-9
                );
            }
        }
    }

    #[test]
    fn serialized_grid_has_no_canonical_values() {
        let grid = CourseGrid::from_json(MARATHON).unwrap();
        let value: serde_json::Value = serde_json::from_str(&grid.to_json().unwrap()).unwrap();

        assert_eq!(value["totalDistance"], "26.2mi");
        assert_eq!(value["totalTime"], "4:00:00");

        let first = &value["races"][0]["segments"][0];
        assert_eq!(first["pace"], "9:00");
        assert_eq!(first["distance"], 10.0);
        assert_eq!(first["units"], "min/mile");
        assert!(first.get("time").is_none());

        let calculated = &value["races"][1]["segments"][0];
        assert!(calculated.get("pace").is_none());
        assert_eq!(calculated["time"], "1:55:00");
    }

    #[test]
    fn speed_paces_are_written_as_strings() {
        let json = r#"{
            "totalDistance": "26.2mi",
            "totalTime": "4:00:00",
            "races": [
                { "units": "kph", "segments": [ { "pace": 10.5, "distance": 21.1 } ] }
            ]
        }"#;
        let grid = CourseGrid::from_json(json).unwrap();
        let written = grid.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();

        let segment = &value["races"][0]["segments"][0];
        assert_eq!(segment["pace"], "10.5");
        assert_eq!(segment["units"], "kph");

        let reread = CourseGrid::from_json(&written).unwrap();
        let pace = reread.races()[0].segments()[0].pace();
        assert_eq!(pace.rate(), 10.5);
        assert_eq!(pace.unit(), PaceUnit::Kph);
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MARATHON.as_bytes()).unwrap();

        let grid = CourseGrid::load(file.path()).unwrap();
        assert_eq!(grid.races().len(), 2);
    }

    #[test]
    fn load_from_reader() {
        let grid = CourseGrid::from_reader(MARATHON.as_bytes()).unwrap();
        assert_eq!(grid.races().len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = CourseGrid::load(&path).unwrap_err();
        assert!(matches!(err, GridError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
