//! Favorite set model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::timetable::SessionId;

/// Identifiers of the sessions the user has favorited.
///
/// The set is independent of any snapshot and may hold identifiers that the
/// current timetable no longer contains.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<SessionId>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.0.contains(id)
    }

    /// Flips membership of `id` and returns the new membership.
    pub fn toggle(&mut self, id: &SessionId) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    /// Returns true when the set changed.
    pub fn insert(&mut self, id: SessionId) -> bool {
        self.0.insert(id)
    }

    /// Returns true when the set changed.
    pub fn remove(&mut self, id: &SessionId) -> bool {
        self.0.remove(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SessionId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = SessionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FavoriteSet {
    type Item = SessionId;
    type IntoIter = std::collections::btree_set::IntoIter<SessionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
