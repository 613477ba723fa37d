//! The unit registry.
//!
//! Distance units map to a fixed number of millimetres. Pace units pair a
//! reference distance unit with a time base (hour or minute) and convert
//! their unit-local rate to and from metres per second.

use std::fmt;
use std::str::FromStr;

use super::{Distance, Duration, PacingError};

/// A unit of length, convertible to millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Yard,
    Mile,
}

impl DistanceUnit {
    /// Every distance unit, smallest first.
    pub const ALL: [DistanceUnit; 7] = [
        DistanceUnit::Millimeter,
        DistanceUnit::Centimeter,
        DistanceUnit::Inch,
        DistanceUnit::Yard,
        DistanceUnit::Meter,
        DistanceUnit::Kilometer,
        DistanceUnit::Mile,
    ];

    /// Suffixes in the order they must be tried when parsing.
    ///
    /// The bare `m` comes last so that `km`, `cm` and `mm` are never read
    /// as metres.
    pub(crate) const PARSE_ORDER: [(&'static str, DistanceUnit); 7] = [
        ("mi", DistanceUnit::Mile),
        ("km", DistanceUnit::Kilometer),
        ("yd", DistanceUnit::Yard),
        ("in", DistanceUnit::Inch),
        ("cm", DistanceUnit::Centimeter),
        ("mm", DistanceUnit::Millimeter),
        ("m", DistanceUnit::Meter),
    ];

    /// Number of millimetres in one of this unit.
    pub fn millimeters(self) -> f64 {
        match self {
            DistanceUnit::Millimeter => 1.0,
            DistanceUnit::Centimeter => 10.0,
            DistanceUnit::Meter => 1_000.0,
            DistanceUnit::Kilometer => 1_000_000.0,
            DistanceUnit::Inch => 25.4,
            DistanceUnit::Yard => 914.4,
            DistanceUnit::Mile => 1_609_344.0,
        }
    }

    /// Number of metres in one of this unit.
    pub fn meters(self) -> f64 {
        self.millimeters() / DistanceUnit::Meter.millimeters()
    }

    /// Short suffix used in distance strings (`"km"`, `"mi"`, ...).
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Millimeter => "mm",
            DistanceUnit::Centimeter => "cm",
            DistanceUnit::Meter => "m",
            DistanceUnit::Kilometer => "km",
            DistanceUnit::Inch => "in",
            DistanceUnit::Yard => "yd",
            DistanceUnit::Mile => "mi",
        }
    }

    /// Look up a unit by its exact suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::PARSE_ORDER
            .iter()
            .find(|(s, _)| *s == suffix)
            .map(|(_, unit)| *unit)
    }

    /// Look up a unit by suffix, failing with the list of valid suffixes.
    pub fn parse(suffix: &str) -> Result<Self, PacingError> {
        Self::from_suffix(suffix).ok_or_else(|| PacingError::UnknownUnit {
            unit: suffix.to_string(),
            valid: Self::ALL
                .iter()
                .map(|unit| unit.suffix())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl FromStr for DistanceUnit {
    type Err = PacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A named rate of travel.
///
/// Speed units (`kph`, `mph`) express distance per hour; pace units
/// (`min/km`, `min/mile`) express minutes per reference distance.
///
/// # Examples
///
/// ```
/// use race_grid::pacing::{DistanceUnit, PaceUnit};
///
/// let unit: PaceUnit = "min/mile".parse().unwrap();
/// assert_eq!(unit, PaceUnit::MinPerMile);
/// assert_eq!(unit.distance_unit(), DistanceUnit::Mile);
///
/// assert!("furlongs/fortnight".parse::<PaceUnit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaceUnit {
    Kph,
    Mph,
    MinPerKm,
    MinPerMile,
}

const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

impl PaceUnit {
    /// Every pace unit in registry order.
    pub const ALL: [PaceUnit; 4] = [
        PaceUnit::Kph,
        PaceUnit::Mph,
        PaceUnit::MinPerKm,
        PaceUnit::MinPerMile,
    ];

    /// Look up a pace unit by its case-sensitive label.
    pub fn parse(label: &str) -> Result<Self, PacingError> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.label() == label)
            .ok_or_else(|| PacingError::UnknownUnit {
                unit: label.to_string(),
                valid: Self::valid_labels(),
            })
    }

    /// Comma-separated list of every accepted label.
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|unit| unit.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Display label, also the JSON representation.
    pub fn label(self) -> &'static str {
        match self {
            PaceUnit::Kph => "kph",
            PaceUnit::Mph => "mph",
            PaceUnit::MinPerKm => "min/km",
            PaceUnit::MinPerMile => "min/mile",
        }
    }

    /// The distance unit rates and segment distances are expressed in.
    pub fn distance_unit(self) -> DistanceUnit {
        match self {
            PaceUnit::Kph | PaceUnit::MinPerKm => DistanceUnit::Kilometer,
            PaceUnit::Mph | PaceUnit::MinPerMile => DistanceUnit::Mile,
        }
    }

    /// True for distance-per-time units, false for time-per-distance units.
    pub fn is_speed(self) -> bool {
        matches!(self, PaceUnit::Kph | PaceUnit::Mph)
    }

    fn base_seconds(self) -> f64 {
        if self.is_speed() {
            SECONDS_PER_HOUR
        } else {
            SECONDS_PER_MINUTE
        }
    }

    /// The time span a rate of 1.0 refers to.
    pub fn time_base(self) -> Duration {
        Duration::from_secs_f64(self.base_seconds())
    }

    /// Convert a unit-local rate to metres per second.
    pub fn to_mps(self, rate: f64) -> f64 {
        let meters = self.distance_unit().meters();
        if self.is_speed() {
            rate * meters / self.base_seconds()
        } else {
            meters / (rate * self.base_seconds())
        }
    }

    /// Convert metres per second to a unit-local rate.
    pub fn from_mps(self, mps: f64) -> f64 {
        let meters = self.distance_unit().meters();
        if self.is_speed() {
            mps * self.base_seconds() / meters
        } else {
            meters / (mps * self.base_seconds())
        }
    }

    /// Render a unit-local rate: two decimals for speeds, `m:ss` or
    /// `h:mm:ss` for paces.
    pub fn format_rate(self, rate: f64) -> String {
        if self.is_speed() {
            format!("{rate:.2}")
        } else {
            Duration::from_secs_f64(rate * self.base_seconds()).to_string()
        }
    }

    /// Express a duration as a multiple of this unit's time base.
    ///
    /// A 6m30s duration is 6.5 for `min/km`; a 90 minute duration is 1.5
    /// for `kph`.
    pub fn rate_from_duration(self, duration: Duration) -> f64 {
        duration.as_secs_f64() / self.time_base().as_secs_f64()
    }

    /// A distance given as a bare number of this unit's distance unit.
    pub fn distance(self, value: f64) -> Distance {
        Distance::new(value, self.distance_unit())
    }

    /// A distance expressed as a number of this unit's distance unit.
    pub fn distance_in_units(self, distance: Distance) -> f64 {
        distance.in_unit(self.distance_unit())
    }

    /// A distance formatted as `"<value> <suffix>"` to two decimals.
    pub fn distance_string(self, distance: Distance) -> String {
        format!(
            "{:.2} {}",
            self.distance_in_units(distance),
            self.distance_unit().suffix()
        )
    }
}

impl FromStr for PaceUnit {
    type Err = PacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
