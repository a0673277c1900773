//! Domain layer for kaigi.
//!
//! Holds the timetable and favorite models, the repository/source traits the
//! infrastructure layer implements, and the pure aggregation and grouping
//! engine.

pub mod config;
pub mod error;
pub mod favorite;
pub mod timetable;

// Re-export common error type
pub use error::KaigiError;
