//! Grid document DTOs.
//!
//! These types map directly to the grid JSON file. Quantity types carry no
//! serde impls of their own; duration fields go through the explicit
//! functions in [`duration_field`] and [`optional_duration_field`].

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::pacing::{Duration, PaceInput};

/// The whole grid file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    /// Course distance with a unit suffix, e.g. `"26.2mi"`.
    pub total_distance: String,

    /// Course time limit.
    #[serde(with = "duration_field")]
    pub total_time: Duration,

    #[serde(default)]
    pub races: Vec<RaceDocument>,
}

/// One race plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceDocument {
    /// Pace unit label shared by the race's segments.
    pub units: String,

    #[serde(default)]
    pub segments: Vec<SegmentDocument>,
}

/// One segment of a race plan, as supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentDocument {
    /// Pace in the unit's native form; empty or absent when not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<PaceField>,

    /// Bare number of the unit's reference distance (km or mi).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Elapsed time; empty or absent when not supplied.
    #[serde(
        default,
        with = "optional_duration_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<Duration>,

    /// Unit label overriding the race's units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

/// A pace as written in JSON: a bare rate or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaceField {
    Rate(f64),
    Text(String),
}

impl PaceField {
    /// The pace input this field supplies, or `None` for an empty string.
    pub fn to_input(&self) -> Option<PaceInput> {
        match self {
            PaceField::Rate(rate) => Some(PaceInput::Rate(*rate)),
            PaceField::Text(text) if text.trim().is_empty() => None,
            PaceField::Text(text) => Some(PaceInput::Text(text.clone())),
        }
    }
}

/// A duration as written in JSON: a string or a nanosecond count.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Nanos(f64),
    Text(String),
}

impl RawDuration {
    fn into_duration<E: de::Error>(self) -> Result<Duration, E> {
        match self {
            RawDuration::Nanos(nanos) if nanos.is_finite() => {
                Ok(Duration::from_nanos(nanos.round() as i64))
            }
            RawDuration::Nanos(nanos) => Err(E::custom(format!("invalid duration: {nanos}"))),
            RawDuration::Text(text) => Duration::parse(&text).map_err(E::custom),
        }
    }
}

/// Serde functions for a required duration field.
pub mod duration_field {
    use super::*;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&duration.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        RawDuration::deserialize(deserializer)?.into_duration()
    }
}

/// Serde functions for an optional duration field.
///
/// `null`, a missing field and an empty string all mean "not supplied".
pub mod optional_duration_field {
    use super::*;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match duration {
            Some(duration) => serializer.serialize_str(&duration.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        match Option::<RawDuration>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawDuration::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(raw) => raw.into_duration().map(Some),
        }
    }
}
