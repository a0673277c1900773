//! Time slots used to bucket sessions for display.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use super::model::Session;

/// A `(start, end)` bucket.
///
/// Slots compare by start time, then end time. Two sessions share a slot only
/// when both bounds match exactly; overlapping ranges are never merged or split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub starts_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
}

impl TimeSlot {
    pub fn new(starts_at: DateTime<FixedOffset>, ends_at: DateTime<FixedOffset>) -> Self {
        Self { starts_at, ends_at }
    }

    pub fn of(session: &Session) -> Self {
        Self::new(session.starts_at, session.ends_at)
    }

    /// Stable key derived from both bounds as Unix milliseconds.
    pub fn key(&self) -> String {
        format!(
            "{}-{}",
            self.starts_at.timestamp_millis(),
            self.ends_at.timestamp_millis()
        )
    }

    pub fn duration(&self) -> Duration {
        self.ends_at - self.starts_at
    }

    /// `HH:MM - HH:MM` in the slot's own offset.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.starts_at.format("%H:%M"),
            self.ends_at.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_order_by_start_then_end() {
        let short = TimeSlot::new(at("2024-09-12T10:00:00+09:00"), at("2024-09-12T10:30:00+09:00"));
        let long = TimeSlot::new(at("2024-09-12T10:00:00+09:00"), at("2024-09-12T11:00:00+09:00"));
        let later = TimeSlot::new(at("2024-09-12T10:10:00+09:00"), at("2024-09-12T10:20:00+09:00"));

        let mut slots = vec![later, long, short];
        slots.sort();
        assert_eq!(slots, vec![short, long, later]);
    }

    #[test]
    fn test_key_is_offset_independent() {
        let jst = TimeSlot::new(at("2024-09-12T10:00:00+09:00"), at("2024-09-12T11:00:00+09:00"));
        let utc = TimeSlot::new(at("2024-09-12T01:00:00+00:00"), at("2024-09-12T02:00:00+00:00"));
        assert_eq!(jst.key(), utc.key());
        assert_eq!(jst, utc);
    }

    #[test]
    fn test_label_and_duration() {
        let slot = TimeSlot::new(at("2024-09-12T10:00:00+09:00"), at("2024-09-12T10:40:00+09:00"));
        assert_eq!(slot.label(), "10:00 - 10:40");
        assert_eq!(slot.duration(), Duration::minutes(40));
    }
}
