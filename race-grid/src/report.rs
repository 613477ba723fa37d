//! Per-race pacing reports.
//!
//! A report is built from a validated [`CourseGrid`] and lists, for each
//! race, what every segment covers and the pace needed over the rest of
//! the course. It can be written as log lines or as JSON.

use serde::Serialize;
use tracing::info;

use crate::grid::{CourseGrid, CourseSegment, GridError, Race};
use crate::pacing::PaceUnit;

/// Summary of one segment, with every quantity formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReport {
    pub distance: String,
    pub time: String,
    pub pace: String,
    pub units: String,
}

impl SegmentReport {
    /// Format a segment, measuring its distance in the race's units.
    pub fn from_segment(segment: &CourseSegment, race_unit: PaceUnit) -> Self {
        let (pace, distance, duration) = segment.stats();
        Self {
            distance: race_unit.distance_string(distance),
            time: duration.to_string(),
            pace: pace.to_string(),
            units: pace.unit().label().to_string(),
        }
    }

    fn completed_line(&self) -> String {
        format!(
            "{} completed in {} with a pace of {} {}",
            self.distance, self.time, self.pace, self.units
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceReport {
    /// 1-based position in the grid.
    pub race: usize,
    pub units: String,
    pub segments: Vec<SegmentReport>,
    /// What is left of the course after the race's segments.
    pub remaining: SegmentReport,
}

impl RaceReport {
    /// Build the report for one race, numbered `number` from 1.
    pub fn from_race(grid: &CourseGrid, race: &Race, number: usize) -> Result<Self, GridError> {
        let unit = race.unit();
        let remaining = grid.remaining_segment(race)?;

        Ok(Self {
            race: number,
            units: unit.label().to_string(),
            segments: race
                .segments()
                .iter()
                .map(|segment| SegmentReport::from_segment(segment, unit))
                .collect(),
            remaining: SegmentReport::from_segment(&remaining, unit),
        })
    }
}

/// The full report for a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReport {
    pub total_distance: String,
    pub total_time: String,
    pub races: Vec<RaceReport>,
}

impl GridReport {
    /// Build the report for every race in a grid.
    pub fn from_grid(grid: &CourseGrid) -> Result<Self, GridError> {
        let races = grid
            .races()
            .iter()
            .enumerate()
            .map(|(i, race)| RaceReport::from_race(grid, race, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            total_distance: grid.total_distance_text().to_string(),
            total_time: grid.total_duration().to_string(),
            races,
        })
    }

    /// Write the report as `info` log lines, one per segment plus one for
    /// the remainder of each race.
    pub fn log(&self) {
        let noun = if self.races.len() == 1 { "race" } else { "races" };
        info!(
            total_distance = %self.total_distance,
            total_time = %self.total_time,
            "Parsed pacing grid with {} {}...",
            self.races.len(),
            noun
        );

        for race in &self.races {
            for (i, segment) in race.segments.iter().enumerate() {
                info!(race = race.race, segment = i + 1, "{}", segment.completed_line());
            }
            info!(race = race.race, "{}", self.remaining_line(race));
        }
    }

    /// Human-readable lines, in the order [`GridReport::log`] emits them.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for race in &self.races {
            lines.extend(race.segments.iter().map(SegmentReport::completed_line));
            lines.push(self.remaining_line(race));
        }
        lines
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn remaining_line(&self, race: &RaceReport) -> String {
        let remaining = &race.remaining;
        format!(
            "A pace of {} {} is required to complete the remaining {} of {} in {} to achieve a time of {}",
            remaining.pace,
            remaining.units,
            remaining.distance,
            self.total_distance,
            remaining.time,
            self.total_time
        )
    }
}
