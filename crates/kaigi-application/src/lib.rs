//! Application layer for kaigi.
//!
//! Wires the domain engine to its collaborators: the favorite store that
//! owns toggles, and the timetable service that publishes the grouped view to
//! subscribers.

pub mod favorite_store;
pub mod timetable_service;
pub mod timetable_state;

pub use favorite_store::FavoriteStore;
pub use timetable_service::TimetableService;
pub use timetable_state::{SnapshotState, TimetableState};
