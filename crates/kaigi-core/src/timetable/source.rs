//! Remote session source trait.
//!
//! Defines the interface the timetable engine uses to obtain snapshots.

use async_trait::async_trait;

use super::model::Timetable;
use crate::error::Result;

/// An abstract source of timetable snapshots.
///
/// Implementations own transport, decoding, room-name mapping and any retry
/// policy. Every successful call returns a complete snapshot that replaces the
/// previous one.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Fetches the full timetable.
    ///
    /// # Returns
    ///
    /// - `Ok(Timetable)`: A complete snapshot
    /// - `Err(KaigiError::Network)`: The request could not be completed
    /// - `Err(KaigiError::Decode)`: The response could not be mapped, including
    ///   unknown room names and duplicate session ids
    async fn fetch_snapshot(&self) -> Result<Timetable>;
}
