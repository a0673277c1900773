//! In-memory favorite repository.

use async_trait::async_trait;
use kaigi_core::error::Result;
use kaigi_core::favorite::{FavoriteRepository, FavoriteSet};
use tokio::sync::Mutex;

/// Keeps the favorite set in process memory only.
///
/// Used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Mutex<FavoriteSet>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites(favorites: FavoriteSet) -> Self {
        Self {
            favorites: Mutex::new(favorites),
        }
    }

    /// Returns what was last saved.
    pub async fn snapshot(&self) -> FavoriteSet {
        self.favorites.lock().await.clone()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn load(&self) -> Result<FavoriteSet> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, favorites: &FavoriteSet) -> Result<()> {
        *self.favorites.lock().await = favorites.clone();
        Ok(())
    }
}
