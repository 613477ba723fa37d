//! Race pacing grid validator.
//!
//! Reads a course (total distance and time limit) with one or more race
//! plans made of segments, resolves each segment's pace, distance and
//! duration, and checks that every plan finishes inside the course.

pub mod config;
pub mod grid;
pub mod pacing;
pub mod report;
