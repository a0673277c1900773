//! Atomic TOML file operations.
//!
//! Every write goes to a sibling temp file, is fsynced, then renamed over the
//! target. Read-modify-write cycles hold an exclusive lock file.

use kaigi_core::KaigiError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Lock error on {path}: {message}")]
    Lock { path: PathBuf, message: String },
}

impl From<AtomicTomlError> for KaigiError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io { .. } | AtomicTomlError::Lock { .. } => {
                KaigiError::io(err.to_string())
            }
            AtomicTomlError::Parse { .. } | AtomicTomlError::Serialize(_) => {
                KaigiError::Serialization {
                    format: "TOML".to_string(),
                    message: err.to_string(),
                }
            }
        }
    }
}

/// A handle to a TOML document on disk.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for AtomicTomlFile<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> std::fmt::Debug for AtomicTomlFile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicTomlFile")
            .field("path", &self.path)
            .finish()
    }
}

impl<T> AtomicTomlFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| AtomicTomlError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Serializes `data` and replaces the file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        tmp_file
            .write_all(toml_string.as_bytes())
            .and_then(|_| tmp_file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }

    /// Loads (or starts from `default_value`), applies `f`, saves, all under
    /// an exclusive lock. Returns whatever `f` returns.
    pub fn update<R, F>(&self, default_value: T, f: F) -> Result<R, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data);
        self.save(&data)?;

        Ok(result)
    }

    /// Replaces the document under the exclusive lock without reading it
    /// first, so an unparsable file is overwritten rather than reported.
    pub fn replace(&self, data: &T) -> Result<(), AtomicTomlError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.save(data)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        match (self.path.parent(), self.path.file_name()) {
            (Some(parent), Some(file_name)) => {
                Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
            }
            _ => Err(self.io_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no parent directory or file name",
            ))),
        }
    }

    fn io_error(&self, source: std::io::Error) -> AtomicTomlError {
        AtomicTomlError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Exclusive lock on `<path>.lock`, released on drop.
///
/// The lock file is left in place: unlinking it would let a later caller lock
/// a fresh inode while another still waits on the old one.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        use fs2::FileExt;

        let lock_path = path.with_extension("lock");
        let lock_error = |message: String| AtomicTomlError::Lock {
            path: lock_path.clone(),
            message,
        };

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| lock_error(e.to_string()))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| lock_error(e.to_string()))?;

        file.lock_exclusive()
            .map_err(|e| lock_error(format!("failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    fn counter(count: u32) -> Counter {
        Counter {
            name: "favorites".to_string(),
            count,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("nested/test.toml"));

        file.save(&counter(42)).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter(42)));
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("missing.toml"));
        assert!(file.load().unwrap().is_none());

        fs::write(file.path(), "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("broken.toml"));
        fs::write(file.path(), "count = [").unwrap();

        let err = file.load().unwrap_err();
        assert!(matches!(err, AtomicTomlError::Parse { .. }));
        assert!(matches!(
            KaigiError::from(err),
            KaigiError::Serialization { .. }
        ));
    }

    #[test]
    fn test_update_returns_closure_result() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("test.toml"));

        let after_first = file
            .update(counter(0), |c| {
                c.count += 10;
                c.count
            })
            .unwrap();
        let after_second = file
            .update(counter(0), |c| {
                c.count += 5;
                c.count
            })
            .unwrap();

        assert_eq!(after_first, 10);
        assert_eq!(after_second, 15);
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("test.toml"));

        file.update(counter(1), |_| ()).unwrap();

        assert!(!temp_dir.path().join(".test.toml.tmp").exists());
        assert!(file.path().exists());
    }

    #[test]
    fn test_replace_overwrites_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("broken.toml"));
        fs::write(file.path(), "count = [").unwrap();

        file.replace(&counter(3)).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter(3)));
    }

    #[test]
    fn test_concurrent_updates_through_separate_handles_lose_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let file = AtomicTomlFile::<Counter>::new(path.clone());
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        file.update(counter(0), |c| c.count += 1).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let file = AtomicTomlFile::<Counter>::new(path);
        assert_eq!(file.load().unwrap().unwrap().count, 100);
    }
}
