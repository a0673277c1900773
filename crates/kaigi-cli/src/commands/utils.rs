use anyhow::{Context, Result};
use kaigi_application::FavoriteStore;
use kaigi_core::config::AppConfig;
use kaigi_core::timetable::SessionSource;
use kaigi_infrastructure::{
    ConfigService, FileSessionSource, HttpSessionSource, KaigiPaths, TomlFavoriteRepository,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Resolved configuration shared by every command.
pub struct AppContext {
    pub config: AppConfig,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to locate config directory")?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to load config from {}", service.path().display()))?;
        tracing::debug!("Using timetable endpoint {}", config.api.timetable_url());

        Ok(Self { config })
    }

    /// A local JSON file when `source` is given, the configured API otherwise.
    pub fn session_source(&self, source: Option<PathBuf>) -> Result<Arc<dyn SessionSource>> {
        match source {
            Some(path) => Ok(Arc::new(FileSessionSource::new(path))),
            None => {
                let http = HttpSessionSource::new(&self.config.api)
                    .context("Failed to build HTTP client")?;
                Ok(Arc::new(http))
            }
        }
    }

    pub async fn favorite_store(&self) -> Result<FavoriteStore> {
        let paths = KaigiPaths::new(self.config.storage.data_dir.clone());
        let repository =
            TomlFavoriteRepository::new(&paths).context("Failed to locate data directory")?;
        tracing::debug!("Favorites file: {}", repository.path().display());

        Ok(FavoriteStore::load(Arc::new(repository)).await)
    }
}
