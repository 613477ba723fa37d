//! Paces: a unit-local rate bound to a [`PaceUnit`].

use std::fmt;

use super::{Distance, Duration, PaceUnit, PacingError};

/// The ways a pace can be supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum PaceInput {
    /// A rate already in the unit's local terms (e.g. `12.5` kph, `6.5` min/mile).
    Rate(f64),
    /// Time per reference distance (e.g. 6m30s per mile).
    DurationLike(Duration),
    /// Text to be read as duration-like first, then as a decimal rate.
    Text(String),
}

impl From<f64> for PaceInput {
    fn from(rate: f64) -> Self {
        PaceInput::Rate(rate)
    }
}

impl From<Duration> for PaceInput {
    fn from(duration: Duration) -> Self {
        PaceInput::DurationLike(duration)
    }
}

impl From<&str> for PaceInput {
    fn from(text: &str) -> Self {
        PaceInput::Text(text.to_string())
    }
}

impl From<String> for PaceInput {
    fn from(text: String) -> Self {
        PaceInput::Text(text)
    }
}

/// A rate of travel in a specific unit.
///
/// The rate is always finite and positive.
///
/// # Examples
///
/// ```
/// use race_grid::pacing::{Distance, Duration, Pace, PaceUnit};
///
/// let pace = Pace::parse("6:30", PaceUnit::MinPerMile).unwrap();
/// assert_eq!(pace.to_string(), "6:30");
///
/// let hour = Duration::parse("1:00:00").unwrap();
/// let covered = pace.distance(hour);
/// assert!((covered.miles() - 60.0 / 6.5).abs() < 1e-9);
///
/// let kph = Pace::parse("12", PaceUnit::Kph).unwrap();
/// assert_eq!(kph.duration(Distance::parse("3km").unwrap()).to_string(), "15:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pace {
    rate: f64,
    unit: PaceUnit,
}

impl Pace {
    /// A pace from a unit-local rate.
    pub fn new(rate: f64, unit: PaceUnit) -> Result<Self, PacingError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PacingError::InvalidRate(rate));
        }
        Ok(Self { rate, unit })
    }

    /// A pace from any supported input form.
    pub fn from_input(input: impl Into<PaceInput>, unit: PaceUnit) -> Result<Self, PacingError> {
        match input.into() {
            PaceInput::Rate(rate) => Self::new(rate, unit),
            PaceInput::DurationLike(duration) => Self::new(unit.rate_from_duration(duration), unit),
            PaceInput::Text(text) => Self::parse(&text, unit),
        }
    }

    /// Parse a pace string.
    ///
    /// Duration-like text (`6:30`, `1:02:03`, `6m30s`) is read as time per
    /// reference distance; anything else must be a decimal rate (`12.5`).
    pub fn parse(text: &str, unit: PaceUnit) -> Result<Self, PacingError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PacingError::InvalidPace {
                input: text.to_string(),
                reason: "empty pace".to_string(),
            });
        }

        match Duration::parse(trimmed) {
            Ok(duration) => Self::new(unit.rate_from_duration(duration), unit),
            Err(duration_err) => match trimmed.parse::<f64>() {
                Ok(rate) => Self::new(rate, unit),
                Err(_) => Err(PacingError::InvalidPace {
                    input: text.to_string(),
                    reason: duration_err.to_string(),
                }),
            },
        }
    }

    /// The pace needed to cover `distance` in `duration`.
    ///
    /// Fails on a zero (or negative) distance or duration rather than
    /// producing an infinite or NaN rate.
    pub fn calculate(
        duration: Duration,
        distance: Distance,
        unit: PaceUnit,
    ) -> Result<Self, PacingError> {
        let seconds = duration.as_secs_f64();
        let meters = distance.meters();
        if seconds <= 0.0 || meters <= 0.0 || !meters.is_finite() {
            return Err(PacingError::DegeneratePace {
                distance: unit.distance_string(distance),
                duration: duration.to_string(),
            });
        }
        Self::new(unit.from_mps(meters / seconds), unit)
    }

    /// The unit-local rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the unit the rate is expressed in.
    pub fn unit(&self) -> PaceUnit {
        self.unit
    }

    /// The pace as a speed in metres per second.
    pub fn meters_per_second(&self) -> f64 {
        self.unit.to_mps(self.rate)
    }

    /// Distance covered at this pace in `duration`.
    pub fn distance(&self, duration: Duration) -> Distance {
        Distance::from_meters(self.meters_per_second() * duration.as_secs_f64())
    }

    /// Time needed to cover `distance` at this pace.
    pub fn duration(&self, distance: Distance) -> Duration {
        Duration::from_secs_f64(distance.meters() / self.meters_per_second())
    }

    /// The same physical pace expressed in another unit.
    pub fn as_unit(&self, unit: PaceUnit) -> Pace {
        Pace {
            rate: unit.from_mps(self.meters_per_second()),
            unit,
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unit.format_rate(self.rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dur(s: &str) -> Duration {
        Duration::parse(s).unwrap()
    }

    fn dist(s: &str) -> Distance {
        Distance::parse(s).unwrap()
    }

    #[test]
    fn parse_duration_like_pace() {
        let pace = Pace::parse("6:30", PaceUnit::MinPerMile).unwrap();
        assert_relative_eq!(pace.rate(), 6.5);
        assert_eq!(pace.unit(), PaceUnit::MinPerMile);

        let pace = Pace::parse("5m15s", PaceUnit::MinPerKm).unwrap();
        assert_relative_eq!(pace.rate(), 5.25);

        let pace = Pace::parse("1:02:00", PaceUnit::MinPerMile).unwrap();
        assert_relative_eq!(pace.rate(), 62.0);
    }

    #[test]
    fn parse_decimal_pace() {
        let pace = Pace::parse("12.5", PaceUnit::Kph).unwrap();
        assert_relative_eq!(pace.rate(), 12.5);

        let pace = Pace::parse("6.5", PaceUnit::MinPerMile).unwrap();
        assert_relative_eq!(pace.rate(), 6.5);
        assert_eq!(pace.to_string(), "6:30");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(matches!(
            Pace::parse("", PaceUnit::Kph),
            Err(PacingError::InvalidPace { .. })
        ));
        assert!(matches!(
            Pace::parse("brisk", PaceUnit::Kph),
            Err(PacingError::InvalidPace { .. })
        ));
        assert!(matches!(
            Pace::parse("0", PaceUnit::MinPerKm),
            Err(PacingError::InvalidRate(_))
        ));
        assert!(matches!(
            Pace::parse("-4", PaceUnit::Mph),
            Err(PacingError::InvalidRate(_))
        ));
    }

    #[test]
    fn invalid_pace_echoes_input() {
        let err = Pace::parse("fast", PaceUnit::Kph).unwrap_err();
        assert!(err.to_string().starts_with("invalid pace string \"fast\""));
    }

    #[test]
    fn from_input_variants() {
        let unit = PaceUnit::MinPerKm;
        let from_rate = Pace::from_input(5.0, unit).unwrap();
        let from_duration = Pace::from_input(dur("5:00"), unit).unwrap();
        let from_text = Pace::from_input("5:00", unit).unwrap();
        let from_string = Pace::from_input(String::from("5"), unit).unwrap();

        assert_eq!(from_rate, from_duration);
        assert_eq!(from_rate, from_text);
        assert_eq!(from_rate, from_string);
    }

    #[test]
    fn from_input_rejects_non_finite_rate() {
        assert!(Pace::from_input(f64::NAN, PaceUnit::Kph).is_err());
        assert!(Pace::from_input(f64::INFINITY, PaceUnit::Kph).is_err());
        assert!(Pace::from_input(Duration::zero(), PaceUnit::MinPerKm).is_err());
    }

    #[test]
    fn distance_in_an_hour_at_six_thirty_per_mile() {
        let pace = Pace::parse("6:30", PaceUnit::MinPerMile).unwrap();
        let covered = pace.distance(dur("1:00:00"));
        assert_relative_eq!(covered.miles(), 60.0 / 6.5, max_relative = 1e-9);
        assert_eq!(PaceUnit::MinPerMile.distance_string(covered), "9.23 mi");
    }

    #[test]
    fn duration_for_distance() {
        let pace = Pace::parse("5:00", PaceUnit::MinPerKm).unwrap();
        assert_eq!(pace.duration(dist("10km")), dur("50:00"));

        let pace = Pace::parse("10", PaceUnit::Mph).unwrap();
        assert_eq!(pace.duration(dist("26.2mi")).to_string(), "2:37:12");
    }

    #[test]
    fn calculate_from_distance_and_duration() {
        let pace = Pace::calculate(dur("50:00"), dist("10km"), PaceUnit::MinPerKm).unwrap();
        assert_relative_eq!(pace.rate(), 5.0, max_relative = 1e-9);
        assert_eq!(pace.to_string(), "5:00");

        let pace = Pace::calculate(dur("1:00:00"), dist("12km"), PaceUnit::Kph).unwrap();
        assert_relative_eq!(pace.rate(), 12.0, max_relative = 1e-9);
        assert_eq!(pace.to_string(), "12.00");
    }

    #[test]
    fn calculate_rejects_degenerate_inputs() {
        let err = Pace::calculate(Duration::zero(), dist("10km"), PaceUnit::MinPerKm).unwrap_err();
        assert_eq!(
            err,
            PacingError::DegeneratePace {
                distance: "10.00 km".into(),
                duration: "0:00".into(),
            }
        );

        assert!(Pace::calculate(dur("10:00"), Distance::zero(), PaceUnit::Kph).is_err());
        assert!(Pace::calculate(dur("-10:00"), dist("1km"), PaceUnit::Kph).is_err());
        assert!(Pace::calculate(dur("10:00"), dist("-1km"), PaceUnit::Kph).is_err());
    }

    #[test]
    fn convert_between_units() {
        let pace = Pace::parse("5:00", PaceUnit::MinPerKm).unwrap();

        let kph = pace.as_unit(PaceUnit::Kph);
        assert_relative_eq!(kph.rate(), 12.0, max_relative = 1e-9);
        assert_eq!(kph.unit(), PaceUnit::Kph);

        let per_mile = pace.as_unit(PaceUnit::MinPerMile);
        assert_relative_eq!(per_mile.rate(), 8.04672, max_relative = 1e-9);
        assert_eq!(per_mile.to_string(), "8:02");

        let back = per_mile.as_unit(PaceUnit::MinPerKm);
        assert_relative_eq!(back.rate(), 5.0, max_relative = 1e-9);
    }
}
