//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` and applies environment overrides.

use kaigi_core::config::AppConfig;
use kaigi_core::error::{KaigiError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::KaigiPaths;

pub const ENV_API_BASE_URL: &str = "KAIGI_API_BASE_URL";
pub const ENV_DATA_DIR: &str = "KAIGI_DATA_DIR";

/// Loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses `config.toml` in the platform config directory.
    pub fn new() -> Result<Self> {
        let path = KaigiPaths::default()
            .config_file()
            .map_err(|e| KaigiError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, reading the file on first access.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = apply_overrides(self.load_file()?, |key| std::env::var(key).ok());
        tracing::debug!("[ConfigService] Loaded config from {:?}", self.path);

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn load_file(&self) -> Result<AppConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&content).map_err(|e| {
            KaigiError::config(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

/// Applies `KAIGI_*` overrides looked up through `lookup`.
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.api.base_url = base_url;
    }
    if let Some(data_dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
        config.storage.data_dir = Some(PathBuf::from(data_dir));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.get_config().unwrap();

        assert_eq!(config.api, AppConfig::default().api);
    }

    #[test]
    fn test_reads_file_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();
        let service = ConfigService::with_path(path.clone());

        assert_eq!(service.get_config().unwrap().api.timeout_secs, 5);

        std::fs::write(&path, "[api]\ntimeout_secs = 9\n").unwrap();
        assert_eq!(service.get_config().unwrap().api.timeout_secs, 5);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().api.timeout_secs, 9);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(matches!(err, KaigiError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_BASE_URL, "http://localhost:9000"),
            (ENV_DATA_DIR, "/var/lib/kaigi"),
        ]);

        let config = apply_overrides(AppConfig::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/var/lib/kaigi")));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = apply_overrides(AppConfig::default(), |_| Some("  ".to_string()));
        assert_eq!(config, AppConfig::default());
    }
}
