//! Path management for kaigi configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/kaigi/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/kaigi/        # Data directory
//! └── favorites.toml           # Favorited session ids
//! ```
//!
//! When a base directory is given, both directories collapse onto it. Tests
//! and `[storage] data_dir` use this.

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR_NAME: &str = "kaigi";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot determine the platform {0} directory")]
    PlatformDirNotFound(&'static str),
}

/// Resolves kaigi's files, optionally below a fixed base directory.
#[derive(Debug, Clone, Default)]
pub struct KaigiPaths {
    base_dir: Option<PathBuf>,
}

impl KaigiPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// e.g. `~/.config/kaigi/`
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::PlatformDirNotFound("config")),
        }
    }

    /// e.g. `~/.local/share/kaigi/`
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::PlatformDirNotFound("data")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn favorites_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("favorites.toml"))
    }
}
