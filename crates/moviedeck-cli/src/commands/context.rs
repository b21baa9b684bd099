use color_eyre::eyre::eyre;
use color_eyre::{Report, Result};
use moviedeck_config::{Config, CredentialStore, PathManager};
use moviedeck_core::{FileKeyValueStore, WishlistStore};
use moviedeck_sources::{CatalogError, TmdbClient};
use std::path::PathBuf;
use tracing::debug;

/// Everything a command needs that comes from disk: where files live and
/// what the config file says.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        Self::from_paths(PathManager::default())
    }

    pub fn from_paths(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        Ok(Self { paths, config })
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let mut store = CredentialStore::new(self.paths.credentials_file());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        Ok(store)
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        let credentials = self.credentials()?;
        TmdbClient::from_config(&self.config, &credentials).map_err(|e| match e {
            CatalogError::MissingApiKey => eyre!(
                "No TMDB API key configured. Run 'moviedeck config api-key' or set TMDB_API_KEY."
            ),
            other => eyre!(other),
        })
    }

    /// Configured log file, if any, with relative names placed in the log directory
    pub fn log_file(&self) -> Option<PathBuf> {
        self.config
            .logging
            .file
            .as_deref()
            .map(|file| self.paths.resolve_log_file(file))
    }

    /// Open the wishlist backed by the local storage file
    pub fn open_wishlist(&self) -> Result<WishlistStore<FileKeyValueStore>> {
        self.paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create moviedeck directories: {}", e))?;

        let storage_file = self.paths.storage_file();
        debug!(path = %storage_file.display(), key = %self.config.wishlist.storage_key, "Opening wishlist");
        Ok(WishlistStore::initialize_with_key(
            FileKeyValueStore::new(storage_file),
            self.config.wishlist.storage_key.clone(),
        ))
    }
}

/// Turn catalog failures the user can act on into a hint
pub fn explain_catalog_error(e: CatalogError) -> Report {
    if e.is_unauthorized() {
        eyre!("TMDB rejected the API key ({}). Run 'moviedeck config api-key' to store a valid one.", e)
    } else {
        eyre!(e)
    }
}
