//! Merging of the remote snapshot with the local favorite set.

use serde::Serialize;
use std::sync::Arc;

use super::model::{Session, Timetable};
use crate::favorite::FavoriteSet;

/// A session together with its favorite status at merge time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedSession {
    pub session: Arc<Session>,
    pub is_favorited: bool,
}

/// Annotates every session of `timetable` with its membership in `favorites`.
///
/// Output order and length match the snapshot. Favorites that reference
/// sessions outside the snapshot are ignored.
pub fn aggregate(timetable: &Timetable, favorites: &FavoriteSet) -> Vec<AnnotatedSession> {
    timetable
        .sessions()
        .iter()
        .map(|session| AnnotatedSession {
            is_favorited: favorites.contains(&session.id),
            session: Arc::clone(session),
        })
        .collect()
}
