pub mod days;
pub mod favorite;
pub mod timetable;
pub mod utils;
