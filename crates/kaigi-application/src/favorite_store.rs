//! Reactive favorite store.
//!
//! Holds the current favorite set in a `watch` channel so the timetable
//! pipeline can follow it, and writes every change through to the repository.

use kaigi_core::error::Result;
use kaigi_core::favorite::{FavoriteRepository, FavoriteSet};
use kaigi_core::timetable::SessionId;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Owner of the favorite set.
///
/// Mutations go through `watch::Sender::send_modify`, which applies them one
/// at a time, so racing toggles never lose an update. Persistence is
/// serialized separately and always writes the latest published set.
pub struct FavoriteStore {
    repository: Arc<dyn FavoriteRepository>,
    sender: watch::Sender<FavoriteSet>,
    persist_lock: Mutex<()>,
}

impl FavoriteStore {
    /// Loads the persisted set.
    ///
    /// A read failure is logged and treated as an empty set.
    pub async fn load(repository: Arc<dyn FavoriteRepository>) -> Self {
        let initial = match repository.load().await {
            Ok(favorites) => {
                tracing::debug!("[FavoriteStore] Loaded {} favorites", favorites.len());
                favorites
            }
            Err(e) => {
                tracing::warn!(
                    "[FavoriteStore] Failed to load favorites, starting empty: {}",
                    e
                );
                FavoriteSet::default()
            }
        };
        Self::with_initial(repository, initial)
    }

    /// Starts from `initial` without reading the repository.
    pub fn with_initial(repository: Arc<dyn FavoriteRepository>, initial: FavoriteSet) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            repository,
            sender,
            persist_lock: Mutex::new(()),
        }
    }

    pub fn current(&self) -> FavoriteSet {
        self.sender.borrow().clone()
    }

    pub fn is_favorite(&self, id: &SessionId) -> bool {
        self.sender.borrow().contains(id)
    }

    /// Receiver positioned at the current set.
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.sender.subscribe()
    }

    /// Flips `id` and returns its new membership.
    ///
    /// The in-memory set keeps the change even if persisting it fails; the
    /// error is still returned.
    pub async fn toggle(&self, id: &SessionId) -> Result<bool> {
        let mut favorited = false;
        self.sender.send_modify(|set| favorited = set.toggle(id));
        tracing::debug!("[FavoriteStore] Toggled {} -> {}", id, favorited);

        self.persist().await?;
        Ok(favorited)
    }

    /// Sets membership of `id`. No-op (and no emission) when already in that state.
    pub async fn set_favorite(&self, id: &SessionId, favorited: bool) -> Result<()> {
        let changed = self.sender.send_if_modified(|set| {
            if favorited {
                set.insert(id.clone())
            } else {
                set.remove(id)
            }
        });
        if changed {
            self.persist().await?;
        }
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        let changed = self.sender.send_if_modified(|set| {
            let had_any = !set.is_empty();
            set.clear();
            had_any
        });
        if changed {
            self.persist().await?;
        }
        Ok(())
    }

    async fn persist(&self) -> Result<()> {
        let _guard = self.persist_lock.lock().await;
        let latest = self.current();
        self.repository.save(&latest).await.inspect_err(|e| {
            tracing::warn!("[FavoriteStore] Failed to persist favorites: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kaigi_core::KaigiError;
    use std::sync::Mutex as StdMutex;

    // Mock FavoriteRepository recording every save
    #[derive(Default)]
    struct RecordingRepository {
        initial: Option<FavoriteSet>,
        fail_load: bool,
        fail_save: bool,
        saves: StdMutex<Vec<FavoriteSet>>,
    }

    #[async_trait]
    impl FavoriteRepository for RecordingRepository {
        async fn load(&self) -> Result<FavoriteSet> {
            if self.fail_load {
                return Err(KaigiError::data_access("corrupted favorites"));
            }
            Ok(self.initial.clone().unwrap_or_default())
        }

        async fn save(&self, favorites: &FavoriteSet) -> Result<()> {
            if self.fail_save {
                return Err(KaigiError::io("disk full"));
            }
            self.saves.lock().unwrap().push(favorites.clone());
            Ok(())
        }
    }

    fn id(value: &str) -> SessionId {
        SessionId::new(value)
    }

    #[tokio::test]
    async fn test_load_uses_persisted_set() {
        let repo = Arc::new(RecordingRepository {
            initial: Some(FavoriteSet::from_iter([id("1")])),
            ..Default::default()
        });

        let store = FavoriteStore::load(repo).await;

        assert!(store.is_favorite(&id("1")));
    }

    #[tokio::test]
    async fn test_load_failure_is_empty_set() {
        let repo = Arc::new(RecordingRepository {
            fail_load: true,
            ..Default::default()
        });

        let store = FavoriteStore::load(repo).await;

        assert!(store.current().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_publishes_and_persists() {
        let repo = Arc::new(RecordingRepository::default());
        let store = FavoriteStore::load(repo.clone()).await;
        let mut rx = store.subscribe();

        assert!(store.toggle(&id("7")).await.unwrap());

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().contains(&id("7")));
        assert_eq!(
            repo.saves.lock().unwrap().last().cloned(),
            Some(FavoriteSet::from_iter([id("7")]))
        );

        assert!(!store.toggle(&id("7")).await.unwrap());
        assert!(!store.is_favorite(&id("7")));
    }

    #[tokio::test]
    async fn test_save_failure_keeps_in_memory_toggle() {
        let repo = Arc::new(RecordingRepository {
            fail_save: true,
            ..Default::default()
        });
        let store = FavoriteStore::load(repo).await;

        let result = store.toggle(&id("3")).await;

        assert!(matches!(result, Err(KaigiError::Io { .. })));
        assert!(store.is_favorite(&id("3")));
    }

    #[tokio::test]
    async fn test_set_favorite_is_idempotent() {
        let repo = Arc::new(RecordingRepository::default());
        let store = FavoriteStore::load(repo.clone()).await;
        let mut rx = store.subscribe();

        store.set_favorite(&id("1"), true).await.unwrap();
        let _ = rx.borrow_and_update();
        store.set_favorite(&id("1"), true).await.unwrap();

        assert!(!rx.has_changed().unwrap());
        assert_eq!(repo.saves.lock().unwrap().len(), 1);

        store.clear().await.unwrap();
        assert!(store.current().is_empty());
        assert_eq!(repo.saves.lock().unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_lose_nothing() {
        let repo = Arc::new(RecordingRepository::default());
        let store = Arc::new(FavoriteStore::load(repo.clone()).await);

        let handles: Vec<_> = (0..32)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.toggle(&SessionId::new(n.to_string())).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        assert_eq!(store.current().len(), 32);
        assert_eq!(repo.saves.lock().unwrap().last().map(FavoriteSet::len), Some(32));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_toggles_on_same_id_cancel_out() {
        let repo = Arc::new(RecordingRepository::default());
        let store = Arc::new(FavoriteStore::load(repo).await);

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.toggle(&SessionId::new("same")).await })
            })
            .collect();
        let mut on = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                on += 1;
            }
        }

        assert_eq!(on, 5);
        assert!(!store.is_favorite(&SessionId::new("same")));
    }
}
