//! Wire format of the timetable API and its mapping onto the domain model.

use chrono::DateTime;
use kaigi_core::error::{KaigiError, Result};
use kaigi_core::timetable::{
    Category, Language, Level, LocaleText, Room, RoomType, Session, SessionAsset, SessionId,
    SessionKind, SessionLanguage, Speaker, Timetable,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    #[serde(default)]
    pub sessions: Vec<SessionDto>,
    #[serde(default)]
    pub rooms: Vec<RoomDto>,
    #[serde(default)]
    pub speakers: Vec<SpeakerDto>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    #[serde(default)]
    pub is_service_session: bool,
    pub title: LocaleTextDto,
    #[serde(default)]
    pub speakers: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    pub language: String,
    pub room_id: u32,
    #[serde(default)]
    pub session_category_item_id: Option<u32>,
    #[serde(default)]
    pub message: Option<LocaleTextDto>,
    #[serde(default)]
    pub interpretation_target: bool,
    #[serde(default)]
    pub levels: Vec<String>,
    #[serde(default)]
    pub asset: Option<AssetDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleTextDto {
    #[serde(default)]
    pub ja: Option<String>,
    #[serde(default)]
    pub en: Option<String>,
}

impl LocaleTextDto {
    fn is_blank(&self) -> bool {
        let blank = |text: &Option<String>| text.as_deref().is_none_or(|t| t.trim().is_empty());
        blank(&self.ja) && blank(&self.en)
    }
}

impl From<LocaleTextDto> for LocaleText {
    fn from(dto: LocaleTextDto) -> Self {
        LocaleText::new(dto.ja.unwrap_or_default(), dto.en.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub slide_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: u32,
    pub name: LocaleTextDto,
    #[serde(default)]
    pub sort: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: u32,
    pub title: LocaleTextDto,
    #[serde(default)]
    pub items: Vec<CategoryItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryItemDto {
    pub id: u32,
    pub name: LocaleTextDto,
}

impl RoomDto {
    fn into_room(self) -> Result<Room> {
        let english = self.name.en.clone().unwrap_or_default();
        let room_type = RoomType::from_str(english.trim())
            .map_err(|_| KaigiError::decode(format!("unknown room name '{}'", english)))?;

        Ok(Room {
            id: self.id,
            name: self.name.into(),
            room_type,
            sort_order: self.sort,
        })
    }
}

impl From<SpeakerDto> for Speaker {
    fn from(dto: SpeakerDto) -> Self {
        Speaker {
            id: dto.id,
            name: dto.name,
            icon_url: dto.profile_picture,
            tagline: dto.tag_line,
        }
    }
}

/// Lookup tables resolving the references of a `SessionDto`.
struct References {
    rooms: HashMap<u32, Room>,
    speakers: HashMap<String, Speaker>,
    category_items: HashMap<u32, Category>,
}

impl References {
    fn resolve(&self, dto: SessionDto) -> Result<Session> {
        let context = |what: String| KaigiError::decode(format!("session '{}': {}", dto.id, what));

        let starts_at = DateTime::parse_from_rfc3339(&dto.starts_at)
            .map_err(|e| context(format!("invalid startsAt '{}': {}", dto.starts_at, e)))?;
        let ends_at = DateTime::parse_from_rfc3339(&dto.ends_at)
            .map_err(|e| context(format!("invalid endsAt '{}': {}", dto.ends_at, e)))?;
        if ends_at < starts_at {
            return Err(context("ends before it starts".to_string()));
        }

        let room = self
            .rooms
            .get(&dto.room_id)
            .cloned()
            .ok_or_else(|| context(format!("unknown room id {}", dto.room_id)))?;

        let speakers = dto
            .speakers
            .iter()
            .map(|id| {
                self.speakers
                    .get(id)
                    .cloned()
                    .ok_or_else(|| context(format!("unknown speaker id '{}'", id)))
            })
            .collect::<Result<Vec<_>>>()?;

        let language = Language::from_str(&dto.language)
            .map_err(|_| context(format!("unknown language '{}'", dto.language)))?;

        let kind = if dto.is_service_session {
            SessionKind::Special {
                description: dto.description.clone(),
            }
        } else {
            let category = match dto.session_category_item_id {
                Some(item_id) => Some(
                    self.category_items
                        .get(&item_id)
                        .cloned()
                        .ok_or_else(|| context(format!("unknown category item {}", item_id)))?,
                ),
                None => None,
            };
            let levels = dto
                .levels
                .iter()
                .map(|level| {
                    Level::from_str(level)
                        .map_err(|_| context(format!("unknown level '{}'", level)))
                })
                .collect::<Result<Vec<_>>>()?;
            let asset = dto.asset.clone().unwrap_or_default();

            SessionKind::Talk {
                description: dto.description.clone().unwrap_or_default(),
                category,
                levels,
                asset: SessionAsset {
                    video_url: asset.video_url,
                    slide_url: asset.slide_url,
                },
            }
        };

        Ok(Session {
            id: SessionId::new(dto.id),
            title: dto.title.into(),
            starts_at,
            ends_at,
            room,
            speakers,
            language: SessionLanguage {
                language,
                is_interpretation_target: dto.interpretation_target,
            },
            message: dto.message.filter(|m| !m.is_blank()).map(Into::into),
            kind,
        })
    }
}

impl TimetableResponse {
    /// Maps the response onto a [`Timetable`], keeping the session order.
    ///
    /// Any unresolvable reference or unknown enumeration value is a
    /// [`KaigiError::Decode`].
    pub fn into_timetable(self) -> Result<Timetable> {
        let rooms = self
            .rooms
            .into_iter()
            .map(RoomDto::into_room)
            .collect::<Result<Vec<_>>>()?;

        let references = References {
            rooms: rooms.iter().map(|room| (room.id, room.clone())).collect(),
            speakers: self
                .speakers
                .into_iter()
                .map(|dto| (dto.id.clone(), Speaker::from(dto)))
                .collect(),
            category_items: self
                .categories
                .into_iter()
                .flat_map(|category| category.items)
                .map(|item| {
                    (
                        item.id,
                        Category {
                            id: item.id,
                            title: item.name.into(),
                        },
                    )
                })
                .collect(),
        };

        let sessions = self
            .sessions
            .into_iter()
            .map(|dto| references.resolve(dto))
            .collect::<Result<Vec<_>>>()?;

        Timetable::new(sessions, rooms)
    }
}

/// Parses an API response body.
pub fn parse_timetable(body: &str) -> Result<Timetable> {
    let response: TimetableResponse = serde_json::from_str(body)
        .map_err(|e| KaigiError::decode(format!("invalid timetable JSON: {}", e)))?;
    response.into_timetable()
}
