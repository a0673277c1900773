//! Infrastructure layer for kaigi.
//!
//! Implements the core traits against the outside world: the timetable API
//! over HTTP, timetable documents on disk, and favorites persisted as TOML.

pub mod config_service;
pub mod dto;
pub mod file_session_source;
pub mod http_session_source;
pub mod memory_favorite_repository;
pub mod paths;
pub mod storage;
pub mod toml_favorite_repository;

pub use crate::config_service::ConfigService;
pub use crate::file_session_source::FileSessionSource;
pub use crate::http_session_source::HttpSessionSource;
pub use crate::memory_favorite_repository::InMemoryFavoriteRepository;
pub use crate::paths::KaigiPaths;
pub use crate::toml_favorite_repository::TomlFavoriteRepository;
