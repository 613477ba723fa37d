//! Unit-aware pacing quantities.
//!
//! This module holds the unit registry and the three quantities a race
//! plan is made of: distances, durations and paces. All of them are
//! immutable values; the registry is a set of constant enums.

mod distance;
mod duration;
mod error;
mod pace;
mod unit;

pub use distance::Distance;
pub use duration::Duration;
pub use error::PacingError;
pub use pace::{Pace, PaceInput};
pub use unit::{DistanceUnit, PaceUnit};
