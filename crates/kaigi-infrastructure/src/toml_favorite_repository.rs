//! TOML-backed favorite repository.
//!
//! File location: `{data_dir}/favorites.toml`

use async_trait::async_trait;
use kaigi_core::error::{KaigiError, Result};
use kaigi_core::favorite::{FavoriteRepository, FavoriteSet};
use std::path::{Path, PathBuf};

use crate::dto::FavoritesDocument;
use crate::paths::KaigiPaths;
use crate::storage::AtomicTomlFile;

/// Stores the favorite set as a versioned TOML document.
///
/// File I/O runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct TomlFavoriteRepository {
    file: AtomicTomlFile<FavoritesDocument>,
}

impl TomlFavoriteRepository {
    /// Resolves `favorites.toml` through `paths`.
    pub fn new(paths: &KaigiPaths) -> Result<Self> {
        let path = paths
            .favorites_file()
            .map_err(|e| KaigiError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a repository for an explicit file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl FavoriteRepository for TomlFavoriteRepository {
    async fn load(&self) -> Result<FavoriteSet> {
        let file = self.file.clone();
        let document = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| KaigiError::internal(format!("Failed to join task: {}", e)))??;

        match document {
            Some(document) => document.into_domain(),
            None => Ok(FavoriteSet::default()),
        }
    }

    async fn save(&self, favorites: &FavoriteSet) -> Result<()> {
        let file = self.file.clone();
        let document = FavoritesDocument::from(favorites);
        tokio::task::spawn_blocking(move || file.replace(&document))
        .await
        .map_err(|e| KaigiError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!(
            "[TomlFavoriteRepository] Saved {} favorites to {:?}",
            favorites.len(),
            self.file.path()
        );
        Ok(())
    }
}
