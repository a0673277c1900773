//! Timetable subscription service.
//!
//! Combines the latest snapshot, favorite set and filters into a grouped view
//! and publishes it on a `watch` channel. A single background task performs
//! every recomputation, so subscribers see results in input-change order and
//! never a view built from a half-applied change.

use kaigi_core::error::Result;
use kaigi_core::favorite::FavoriteSet;
use kaigi_core::timetable::{
    SessionId, SessionSource, Timetable, TimetableFilters, build_view,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::favorite_store::FavoriteStore;
use crate::timetable_state::{SnapshotState, TimetableState};

/// Publishes the favorite-aware, slot-grouped timetable.
///
/// Must be created inside a tokio runtime; the recomputation task stops on
/// [`TimetableService::shutdown`] or when the service is dropped.
pub struct TimetableService {
    source: Arc<dyn SessionSource>,
    favorites: Arc<FavoriteStore>,
    snapshot_tx: watch::Sender<SnapshotState>,
    filters_tx: watch::Sender<TimetableFilters>,
    state_tx: Arc<watch::Sender<TimetableState>>,
    /// Bumped by every refresh and push; a fetch publishes only if no newer one started.
    generation: AtomicU64,
    cancel: CancellationToken,
}

impl TimetableService {
    pub fn new(source: Arc<dyn SessionSource>, favorites: Arc<FavoriteStore>) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(SnapshotState::Loading);
        let (filters_tx, filters_rx) = watch::channel(TimetableFilters::default());
        let (state_tx, _state_rx) = watch::channel(TimetableState::Loading);
        let state_tx = Arc::new(state_tx);
        let cancel = CancellationToken::new();

        tokio::spawn(run_pipeline(
            snapshot_rx,
            favorites.subscribe(),
            filters_rx,
            Arc::clone(&state_tx),
            cancel.clone(),
        ));

        Self {
            source,
            favorites,
            snapshot_tx,
            filters_tx,
            state_tx,
            generation: AtomicU64::new(0),
            cancel,
        }
    }

    /// Subscribes to the grouped timetable.
    ///
    /// The receiver starts at the current state; history is not replayed.
    pub fn observe_timetable_view(&self) -> watch::Receiver<TimetableState> {
        self.state_tx.subscribe()
    }

    pub fn current(&self) -> TimetableState {
        self.state_tx.borrow().clone()
    }

    /// The snapshot currently in use, if one has been loaded.
    pub fn snapshot(&self) -> Option<Arc<Timetable>> {
        match &*self.snapshot_tx.borrow() {
            SnapshotState::Loaded(timetable) => Some(Arc::clone(timetable)),
            _ => None,
        }
    }

    /// Fetches a new snapshot and replaces the current one.
    ///
    /// A failure is published as [`TimetableState::Failed`] and returned. If
    /// another refresh or push started meanwhile, this result is discarded.
    pub async fn refresh(&self) -> Result<()> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("[TimetableService] Refresh #{} started", ticket);

        let result = self.source.fetch_snapshot().await.map(Arc::new);

        // Generation check and store happen under the channel lock.
        let published = self.snapshot_tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = match &result {
                Ok(timetable) => SnapshotState::Loaded(Arc::clone(timetable)),
                Err(e) => SnapshotState::Failed(e.clone()),
            };
            true
        });

        match result {
            Ok(_) if !published => {
                tracing::debug!("[TimetableService] Refresh #{} superseded, discarding", ticket);
                Ok(())
            }
            Ok(timetable) => {
                tracing::info!(
                    "[TimetableService] Snapshot replaced: {} sessions",
                    timetable.len()
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[TimetableService] Refresh #{} failed: {}", ticket, e);
                Err(e)
            }
        }
    }

    /// Replaces the snapshot with one obtained elsewhere.
    pub fn publish_snapshot(&self, timetable: Timetable) {
        tracing::info!(
            "[TimetableService] Snapshot pushed: {} sessions",
            timetable.len()
        );
        let timetable = Arc::new(timetable);
        self.snapshot_tx.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SnapshotState::Loaded(timetable);
        });
    }

    pub fn filters(&self) -> TimetableFilters {
        self.filters_tx.borrow().clone()
    }

    /// Replaces the filters; emits only when they actually change.
    pub fn set_filters(&self, filters: TimetableFilters) {
        self.filters_tx.send_if_modified(|current| {
            if *current == filters {
                false
            } else {
                *current = filters;
                true
            }
        });
    }

    /// Edits the filters in place; concurrent edits are applied one after another.
    pub fn update_filters<F>(&self, f: F)
    where
        F: FnOnce(&mut TimetableFilters),
    {
        self.filters_tx.send_if_modified(|current| {
            let before = current.clone();
            f(current);
            *current != before
        });
    }

    pub fn favorites(&self) -> &Arc<FavoriteStore> {
        &self.favorites
    }

    /// Toggles a favorite; the view re-emits with the flipped flag.
    pub async fn toggle_favorite(&self, id: &SessionId) -> Result<bool> {
        self.favorites.toggle(id).await
    }

    /// Stops the recomputation task. The last published state stays readable.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for TimetableService {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn compute(
    snapshot: &SnapshotState,
    favorites: &FavoriteSet,
    filters: &TimetableFilters,
) -> TimetableState {
    match snapshot {
        SnapshotState::Loading => TimetableState::Loading,
        SnapshotState::Failed(error) => TimetableState::Failed(error.clone()),
        SnapshotState::Loaded(timetable) => {
            let view = build_view(timetable, favorites, filters);
            tracing::debug!(
                "[TimetableService] Recomputed view: {} slots, {} sessions",
                view.slot_count(),
                view.session_count()
            );
            TimetableState::Loaded(Arc::new(view))
        }
    }
}

async fn run_pipeline(
    mut snapshot_rx: watch::Receiver<SnapshotState>,
    mut favorites_rx: watch::Receiver<FavoriteSet>,
    mut filters_rx: watch::Receiver<TimetableFilters>,
    state_tx: Arc<watch::Sender<TimetableState>>,
    cancel: CancellationToken,
) {
    loop {
        let next = {
            let snapshot = snapshot_rx.borrow_and_update();
            let favorites = favorites_rx.borrow_and_update();
            let filters = filters_rx.borrow_and_update();
            compute(&snapshot, &favorites, &filters)
        };

        state_tx.send_if_modified(|current| {
            if current.is_loading() && next.is_loading() {
                false
            } else {
                *current = next;
                true
            }
        });

        let upstream = tokio::select! {
            _ = cancel.cancelled() => break,
            changed = snapshot_rx.changed() => changed,
            changed = favorites_rx.changed() => changed,
            changed = filters_rx.changed() => changed,
        };
        if upstream.is_err() {
            tracing::debug!("[TimetableService] Upstream closed, stopping pipeline");
            break;
        }
    }
}
