//! Distance quantities, stored canonically in millimetres.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use super::{DistanceUnit, PacingError};

/// A length, held as a number of millimetres.
///
/// # Examples
///
/// ```
/// use race_grid::pacing::Distance;
///
/// let d = Distance::parse("5km").unwrap();
/// assert_eq!(d.millimeters(), 5_000_000.0);
/// assert_eq!(d.meters(), 5_000.0);
///
/// // A unit suffix is required
/// assert!(Distance::parse("5").is_err());
/// assert!(Distance::parse("5 parsecs").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Distance(f64);

impl Distance {
    /// The empty distance.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// A distance given in millimetres.
    pub fn from_millimeters(millimeters: f64) -> Self {
        Self(millimeters)
    }

    /// A distance given in metres.
    pub fn from_meters(meters: f64) -> Self {
        Self::new(meters, DistanceUnit::Meter)
    }

    /// A distance of `value` units.
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self(value * unit.millimeters())
    }

    /// Parse a decimal number immediately followed by a unit suffix
    /// (`mi`, `km`, `yd`, `in`, `cm`, `mm` or `m`).
    pub fn parse(s: &str) -> Result<Self, PacingError> {
        let trimmed = s.trim();
        let invalid = || PacingError::InvalidDistance(s.to_string());

        let (number, unit) = DistanceUnit::PARSE_ORDER
            .iter()
            .find_map(|(suffix, unit)| trimmed.strip_suffix(suffix).map(|n| (n, *unit)))
            .ok_or_else(invalid)?;

        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(value, unit))
    }

    /// The distance expressed as a number of `unit`.
    pub fn in_unit(&self, unit: DistanceUnit) -> f64 {
        self.0 / unit.millimeters()
    }

    /// Returns the distance in millimetres.
    pub fn millimeters(&self) -> f64 {
        self.0
    }

    /// Returns the distance in centimetres.
    pub fn centimeters(&self) -> f64 {
        self.in_unit(DistanceUnit::Centimeter)
    }

    /// Returns the distance in metres.
    pub fn meters(&self) -> f64 {
        self.in_unit(DistanceUnit::Meter)
    }

    /// Returns the distance in kilometres.
    pub fn kilometers(&self) -> f64 {
        self.in_unit(DistanceUnit::Kilometer)
    }

    /// Returns the distance in inches.
    pub fn inches(&self) -> f64 {
        self.in_unit(DistanceUnit::Inch)
    }

    /// Returns the distance in yards.
    pub fn yards(&self) -> f64 {
        self.in_unit(DistanceUnit::Yard)
    }

    /// Returns the distance in miles.
    pub fn miles(&self) -> f64 {
        self.in_unit(DistanceUnit::Mile)
    }
}

impl FromStr for Distance {
    type Err = PacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Distance) {
        self.0 += rhs.0;
    }
}

impl Sub for Distance {
    type Output = Distance;

    fn sub(self, rhs: Distance) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Self {
        iter.fold(Distance::zero(), Add::add)
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({}mm)", self.0)
    }
}
