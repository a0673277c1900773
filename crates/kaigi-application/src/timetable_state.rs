//! States published by the timetable pipeline.

use kaigi_core::KaigiError;
use kaigi_core::timetable::{Timetable, TimetableView};
use std::sync::Arc;

/// Latest outcome of the remote source.
#[derive(Debug, Clone, Default)]
pub enum SnapshotState {
    /// No fetch has completed yet.
    #[default]
    Loading,
    Loaded(Arc<Timetable>),
    /// The most recent fetch failed; the error is passed on unmodified.
    Failed(KaigiError),
}

/// What subscribers of the timetable observe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimetableState {
    #[default]
    Loading,
    Loaded(Arc<TimetableView>),
    Failed(KaigiError),
}

impl TimetableState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn view(&self) -> Option<&Arc<TimetableView>> {
        match self {
            Self::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&KaigiError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}
