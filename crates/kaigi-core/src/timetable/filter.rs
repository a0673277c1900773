//! Day, room, language and text filters applied before grouping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::{AnnotatedSession, aggregate};
use super::group::{TimetableView, group};
use super::model::{Language, RoomType, Timetable};
use crate::favorite::FavoriteSet;

/// Narrowing criteria for the timetable view.
///
/// An empty list means "no restriction" for that dimension; the default value
/// lets every session through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimetableFilters {
    #[serde(default)]
    pub days: Vec<NaiveDate>,
    #[serde(default)]
    pub rooms: Vec<RoomType>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub favorites_only: bool,
    /// Case-insensitive match against titles and speaker names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl TimetableFilters {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn with_day(mut self, day: NaiveDate) -> Self {
        self.days.push(day);
        self
    }

    pub fn with_room(mut self, room: RoomType) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.languages.push(language);
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, item: &AnnotatedSession) -> bool {
        let session = &item.session;

        if self.favorites_only && !item.is_favorited {
            return false;
        }
        if !self.days.is_empty() && !self.days.contains(&session.day()) {
            return false;
        }
        if !self.rooms.is_empty() && !self.rooms.contains(&session.room.room_type) {
            return false;
        }
        if !self.languages.is_empty() && !self.languages.contains(&session.language.language) {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                session.title.contains_lowercase(&needle)
                    || session
                        .speakers
                        .iter()
                        .any(|speaker| speaker.name.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

/// Aggregates, filters and groups in one pass.
pub fn build_view(
    timetable: &Timetable,
    favorites: &FavoriteSet,
    filters: &TimetableFilters,
) -> TimetableView {
    group(
        aggregate(timetable, favorites)
            .into_iter()
            .filter(|item| filters.matches(item)),
    )
}
