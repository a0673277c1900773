//! Data transfer objects for the remote API and local files.

pub mod favorite;
pub mod timetable;

pub use favorite::{FAVORITES_SCHEMA_VERSION, FavoritesDocument};
pub use timetable::{TimetableResponse, parse_timetable};
