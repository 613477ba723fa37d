//! Course grids: segment resolution, race totals and validation.
//!
//! A grid is read from a JSON document ([`dto`]), each segment is resolved
//! into a full pace/distance/duration triple, and every race is checked
//! against the course totals before a [`CourseGrid`] is handed out.

mod course;
pub mod dto;
mod error;
mod segment;

pub use course::{CourseGrid, Race};
pub use dto::{GridDocument, PaceField, RaceDocument, SegmentDocument};
pub use error::GridError;
pub use segment::{CourseSegment, Resolution, SegmentPlan};
