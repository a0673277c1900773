//! Session source reading a timetable document from disk.

use async_trait::async_trait;
use kaigi_core::error::{KaigiError, Result};
use kaigi_core::timetable::{SessionSource, Timetable};
use std::path::{Path, PathBuf};

use crate::dto::parse_timetable;

/// Reads the same JSON document the API serves, for offline use and fixtures.
#[derive(Debug, Clone)]
pub struct FileSessionSource {
    path: PathBuf,
}

impl FileSessionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionSource for FileSessionSource {
    async fn fetch_snapshot(&self) -> Result<Timetable> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            KaigiError::io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        parse_timetable(&body)
    }
}
