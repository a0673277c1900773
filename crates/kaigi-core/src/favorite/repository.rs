//! Favorite repository trait.
//!
//! Defines the interface for favorite persistence operations.

use async_trait::async_trait;

use super::model::FavoriteSet;
use crate::error::Result;

/// An abstract repository for persisting the favorite set.
///
/// This trait decouples the favorite store from the storage mechanism
/// (TOML file, in-memory, platform key-value store).
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Loads the persisted favorite set.
    ///
    /// # Returns
    ///
    /// - `Ok(FavoriteSet)`: The stored set, empty when nothing was stored yet
    /// - `Err(_)`: Storage could not be read or decoded
    async fn load(&self) -> Result<FavoriteSet>;

    /// Replaces the persisted favorite set.
    ///
    /// # Arguments
    ///
    /// * `favorites` - The complete set to store
    async fn save(&self, favorites: &FavoriteSet) -> Result<()>;
}
