//! Timetable domain module.
//!
//! This module contains the timetable snapshot model and the pure engine that
//! turns a snapshot plus a favorite set into a grouped view.
//!
//! # Module Structure
//!
//! - `model`: Sessions, rooms, speakers and the `Timetable` snapshot
//! - `slot`: `TimeSlot` buckets
//! - `aggregate`: Favorite annotation (`AnnotatedSession`)
//! - `group`: Slot grouping (`TimetableView`)
//! - `filter`: Day/room/language/text filters and `build_view`
//! - `source`: `SessionSource` trait implemented by the infrastructure layer

mod aggregate;
mod filter;
mod group;
mod model;
mod slot;
pub mod source;

pub use aggregate::{AnnotatedSession, aggregate};
pub use filter::{TimetableFilters, build_view};
pub use group::{TimetableView, group};
pub use model::{
    Category, Lang, Language, Level, LocaleText, Room, RoomType, Session, SessionAsset, SessionId,
    SessionKind, SessionLanguage, Speaker, Timetable,
};
pub use slot::TimeSlot;
pub use source::SessionSource;
