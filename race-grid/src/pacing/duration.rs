//! Elapsed-time spans.
//!
//! Durations are entered either as clock strings (`h:mm:ss`, `m:ss`) or as
//! suffixed spans such as `1h30m`, `90s` or `250ms`. Clock strings are
//! rewritten into the suffixed form before parsing.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use chrono::Duration as TimeSpan;

use super::PacingError;

const NANOS_PER_SECOND: f64 = 1e9;

/// Scale of each accepted suffix, in nanoseconds.
const SUFFIX_NANOS: [(&str, f64); 8] = [
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3), // U+00B5 micro sign
    ("μs", 1e3), // U+03BC greek mu
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3_600e9),
];

/// A span of elapsed time with nanosecond resolution.
///
/// # Examples
///
/// ```
/// use race_grid::pacing::Duration;
///
/// let d = Duration::parse("1:02:03").unwrap();
/// assert_eq!(d, Duration::parse("1h2m3s").unwrap());
/// assert_eq!(d.to_string(), "1:02:03");
///
/// let short = Duration::parse("7:05").unwrap();
/// assert_eq!(short.to_string(), "7:05");
///
/// // Subtraction never goes below zero
/// assert!(short.saturating_sub(d).is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    span: TimeSpan,
}

impl Duration {
    /// The empty span.
    pub fn zero() -> Self {
        Self {
            span: TimeSpan::zero(),
        }
    }

    /// A span of whole nanoseconds.
    pub fn from_nanos(nanos: i64) -> Self {
        Self {
            span: TimeSpan::nanoseconds(nanos),
        }
    }

    /// A span of fractional seconds, rounded to the nearest nanosecond.
    ///
    /// Values outside the representable range saturate; NaN is zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_nan() {
            return Self::zero();
        }
        let nanos = (secs * NANOS_PER_SECOND).round();
        let nanos = if nanos >= i64::MAX as f64 {
            i64::MAX
        } else if nanos <= i64::MIN as f64 {
            i64::MIN
        } else {
            nanos as i64
        };
        Self::from_nanos(nanos)
    }

    /// Parse a clock string (`h:mm:ss`, `m:ss`) or a suffixed span
    /// (`1h30m`, `45.5s`, `-2m`).
    pub fn parse(s: &str) -> Result<Self, PacingError> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();
        let rewritten = match parts.as_slice() {
            [h, m, s] => format!("{h}h{m}m{s}s"),
            [m, s] => format!("{m}m{s}s"),
            _ => trimmed.to_string(),
        };

        parse_suffixed(&rewritten)
            .map(Self::from_nanos)
            .ok_or_else(|| PacingError::InvalidDuration(s.to_string()))
    }

    /// Whole nanoseconds in this span, saturating at the `i64` range.
    pub fn as_nanos(&self) -> i64 {
        self.span.num_nanoseconds().unwrap_or(if self.span < TimeSpan::zero() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// The span in fractional seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.span.num_seconds() as f64 + f64::from(self.span.subsec_nanos()) / NANOS_PER_SECOND
    }

    /// Returns true for the empty span.
    pub fn is_zero(&self) -> bool {
        self.span.is_zero()
    }

    /// Subtract `other`, clamping at zero instead of going negative.
    pub fn saturating_sub(self, other: Duration) -> Duration {
        match self.span.checked_sub(&other.span) {
            Some(rest) if rest > TimeSpan::zero() => Self { span: rest },
            _ => Self::zero(),
        }
    }
}

/// Parse a sequence of `<decimal><suffix>` components into nanoseconds.
fn parse_suffixed(input: &str) -> Option<i64> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total = 0.0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_end];
        if number.is_empty() || number == "." {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        rest = &rest[number_end..];

        let suffix_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let suffix = &rest[..suffix_end];
        let (_, scale) = SUFFIX_NANOS.iter().find(|(s, _)| *s == suffix)?;
        rest = &rest[suffix_end..];

        total += value * scale;
    }

    let total = total.round();
    if total > i64::MAX as f64 {
        return None;
    }
    let nanos = total as i64;
    Some(if negative { -nanos } else { nanos })
}

impl Default for Duration {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Duration {
    type Err = PacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            span: self.span + rhs.span,
        }
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Self {
        iter.fold(Duration::zero(), Add::add)
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.span.cmp(&other.span)
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({self})")
    }
}

/// Clock format: `m:ss` under an hour, `h:mm:ss` otherwise. Sub-second
/// remainders are truncated.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.span.num_seconds();
        if total < 0 {
            f.write_str("-")?;
        }
        let total = total.unsigned_abs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours == 0 {
            write!(f, "{minutes}:{seconds:02}")
        } else {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        }
    }
}
