//! Versioned on-disk document for the favorite set.

use kaigi_core::error::{KaigiError, Result};
use kaigi_core::favorite::FavoriteSet;
use kaigi_core::timetable::SessionId;
use semver::Version;
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const FAVORITES_SCHEMA_VERSION: Version = Version::new(1, 0, 0);

/// Contents of `favorites.toml`.
///
/// ```toml
/// schema_version = "1.0.0"
/// favorites = ["1", "2"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesDocument {
    pub schema_version: Version,
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl Default for FavoritesDocument {
    fn default() -> Self {
        Self {
            schema_version: FAVORITES_SCHEMA_VERSION,
            favorites: Vec::new(),
        }
    }
}

impl From<&FavoriteSet> for FavoritesDocument {
    fn from(set: &FavoriteSet) -> Self {
        Self {
            schema_version: FAVORITES_SCHEMA_VERSION,
            favorites: set.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl FavoritesDocument {
    /// Converts to the domain set; documents from another major version are rejected.
    pub fn into_domain(self) -> Result<FavoriteSet> {
        if self.schema_version.major != FAVORITES_SCHEMA_VERSION.major {
            return Err(KaigiError::data_access(format!(
                "unsupported favorites schema version {} (expected {}.x)",
                self.schema_version, FAVORITES_SCHEMA_VERSION.major
            )));
        }
        Ok(self.favorites.into_iter().map(SessionId::from).collect())
    }
}
