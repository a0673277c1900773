//! Time-slot grouping of annotated sessions.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::aggregate::AnnotatedSession;
use super::slot::TimeSlot;

/// Sessions bucketed by exact `(start, end)` match, slots in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimetableView {
    slots: BTreeMap<TimeSlot, Vec<AnnotatedSession>>,
}

impl TimetableView {
    /// Iterates slots ascending by start, then end.
    pub fn slots(&self) -> impl Iterator<Item = (&TimeSlot, &[AnnotatedSession])> {
        self.slots
            .iter()
            .map(|(slot, sessions)| (slot, sessions.as_slice()))
    }

    pub fn get(&self, slot: &TimeSlot) -> Option<&[AnnotatedSession]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn session_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All sessions in slot order.
    pub fn sessions(&self) -> impl Iterator<Item = &AnnotatedSession> {
        self.slots.values().flatten()
    }

    /// Drops unfavorited sessions, then slots left empty.
    pub fn favorites_only(&self) -> Self {
        self.slots
            .values()
            .flatten()
            .filter(|item| item.is_favorited)
            .cloned()
            .collect()
    }
}

impl FromIterator<AnnotatedSession> for TimetableView {
    fn from_iter<I: IntoIterator<Item = AnnotatedSession>>(iter: I) -> Self {
        group(iter)
    }
}

/// Partitions `sessions` into slots keyed by their own start and end.
///
/// Sessions keep their relative input order inside a slot. Overlapping but
/// non-identical ranges each get their own slot; zero-length sessions too.
pub fn group<I>(sessions: I) -> TimetableView
where
    I: IntoIterator<Item = AnnotatedSession>,
{
    let mut slots: BTreeMap<TimeSlot, Vec<AnnotatedSession>> = BTreeMap::new();
    for item in sessions {
        match slots.entry(TimeSlot::of(&item.session)) {
            Entry::Occupied(mut entry) => entry.get_mut().push(item),
            Entry::Vacant(entry) => {
                entry.insert(vec![item]);
            }
        }
    }
    TimetableView { slots }
}
