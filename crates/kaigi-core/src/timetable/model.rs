//! Timetable domain model.
//!
//! This module contains the immutable records delivered by the remote
//! timetable source: sessions, rooms, speakers and the snapshot that owns
//! them.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use strum::{Display, EnumIter, EnumString};

use crate::error::{KaigiError, Result};

/// Identifier of a session, unique within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Display language used to pick a rendition of a [`LocaleText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ja,
    En,
}

/// Text delivered in both Japanese and English.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocaleText {
    pub ja: String,
    pub en: String,
}

impl LocaleText {
    pub fn new(ja: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ja: ja.into(),
            en: en.into(),
        }
    }

    /// Returns the rendition for `lang`, falling back to the other one when empty.
    pub fn get(&self, lang: Lang) -> &str {
        let (preferred, fallback) = match lang {
            Lang::Ja => (&self.ja, &self.en),
            Lang::En => (&self.en, &self.ja),
        };
        if preferred.is_empty() {
            fallback
        } else {
            preferred
        }
    }

    /// Case-insensitive containment check against both renditions.
    ///
    /// `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.ja.to_lowercase().contains(needle) || self.en.to_lowercase().contains(needle)
    }
}

/// The five physical rooms of the venue.
///
/// Parsed case-insensitively from the English room name delivered by the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RoomType {
    Flamingo,
    Giraffe,
    Hedgehog,
    Iguana,
    Jellyfish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub name: LocaleText,
    pub room_type: RoomType,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub tagline: Option<String>,
}

/// Spoken language of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Language {
    Japanese,
    English,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLanguage {
    pub language: Language,
    /// Whether simultaneous interpretation is provided.
    pub is_interpretation_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub title: LocaleText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionAsset {
    pub video_url: Option<String>,
    pub slide_url: Option<String>,
}

/// Variant-specific part of a [`Session`].
///
/// The scheduling engine only looks at the shared base fields of `Session`;
/// the variant is carried through for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionKind {
    /// A regular talk submitted through the call for papers.
    Talk {
        description: String,
        category: Option<Category>,
        levels: Vec<Level>,
        asset: SessionAsset,
    },
    /// Welcome talk, lunch, breaks and other service sessions.
    Special { description: Option<String> },
}

/// An immutable timetable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: LocaleText,
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    pub room: Room,
    pub speakers: Vec<Speaker>,
    pub language: SessionLanguage,
    /// Cancellation or change notice, if any.
    pub message: Option<LocaleText>,
    pub kind: SessionKind,
}

impl Session {
    /// Local calendar date the session starts on, in its own UTC offset.
    pub fn day(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }

    pub fn is_special(&self) -> bool {
        matches!(self.kind, SessionKind::Special { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        self.message.is_some()
    }
}

/// A complete, point-in-time timetable delivered by the remote source.
///
/// Snapshots are replaced wholesale; they are never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timetable {
    sessions: Vec<Arc<Session>>,
    rooms: Vec<Room>,
}

impl Timetable {
    /// Builds a snapshot, rejecting duplicate session identifiers.
    pub fn new(sessions: Vec<Session>, mut rooms: Vec<Room>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(sessions.len());
        for session in &sessions {
            if !seen.insert(&session.id) {
                return Err(KaigiError::decode(format!(
                    "duplicate session id '{}' in snapshot",
                    session.id
                )));
            }
        }
        rooms.sort_by_key(|room| room.sort_order);

        Ok(Self {
            sessions: sessions.into_iter().map(Arc::new).collect(),
            rooms,
        })
    }

    pub fn sessions(&self) -> &[Arc<Session>] {
        &self.sessions
    }

    /// Rooms ordered by their sort order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn get(&self, id: &SessionId) -> Option<&Arc<Session>> {
        self.sessions.iter().find(|session| &session.id == id)
    }

    /// Distinct conference days, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.sessions.iter().map(|s| s.day()).collect();
        days.sort();
        days.dedup();
        days
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::test_support::{room, session};
    use std::str::FromStr;

    #[test]
    fn test_room_type_parse_is_case_insensitive() {
        assert_eq!(RoomType::from_str("flamingo").unwrap(), RoomType::Flamingo);
        assert_eq!(RoomType::from_str("JELLYFISH").unwrap(), RoomType::Jellyfish);
        assert!(RoomType::from_str("Koala").is_err());
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::from_str("JAPANESE").unwrap(), Language::Japanese);
        assert_eq!(Language::from_str("mixed").unwrap(), Language::Mixed);
        assert_eq!(Language::English.to_string(), "ENGLISH");
    }

    #[test]
    fn test_locale_text_fallback() {
        let text = LocaleText::new("", "Keynote");
        assert_eq!(text.get(Lang::Ja), "Keynote");
        assert_eq!(text.get(Lang::En), "Keynote");

        let text = LocaleText::new("基調講演", "Keynote");
        assert_eq!(text.get(Lang::Ja), "基調講演");
    }

    #[test]
    fn test_timetable_rejects_duplicate_ids() {
        let sessions = vec![
            session("1", "2024-09-12T10:00:00+09:00", "2024-09-12T11:00:00+09:00"),
            session("1", "2024-09-12T11:00:00+09:00", "2024-09-12T12:00:00+09:00"),
        ];
        let err = Timetable::new(sessions, vec![room(RoomType::Flamingo)]).unwrap_err();
        assert!(matches!(err, KaigiError::Decode(_)));
    }

    #[test]
    fn test_timetable_days_are_distinct_and_sorted() {
        let sessions = vec![
            session("2", "2024-09-13T10:00:00+09:00", "2024-09-13T11:00:00+09:00"),
            session("1", "2024-09-12T10:00:00+09:00", "2024-09-12T11:00:00+09:00"),
            session("3", "2024-09-12T13:00:00+09:00", "2024-09-12T14:00:00+09:00"),
        ];
        let timetable = Timetable::new(sessions, Vec::new()).unwrap();

        assert_eq!(
            timetable.days(),
            vec![
                NaiveDate::from_ymd_opt(2024, 9, 12).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 13).unwrap(),
            ]
        );
        assert!(timetable.get(&SessionId::new("3")).is_some());
        assert!(timetable.get(&SessionId::new("99")).is_none());
    }
}
