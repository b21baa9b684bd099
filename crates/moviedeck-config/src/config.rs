use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage key the wishlist is persisted under unless configured otherwise
pub const DEFAULT_WISHLIST_KEY: &str = "wishlist";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub wishlist: WishlistConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Optional `language` query parameter, e.g. "en-US"
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WishlistConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_home_section_limit")]
    pub home_section_limit: usize,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_suggestion_min_chars")]
    pub suggestion_min_chars: usize,
    #[serde(default = "default_suggestion_debounce_ms")]
    pub suggestion_debounce_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr. Relative
    /// names are placed in the log directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_storage_key() -> String {
    DEFAULT_WISHLIST_KEY.to_string()
}

fn default_home_section_limit() -> usize {
    12
}

fn default_similar_limit() -> usize {
    8
}

fn default_suggestion_limit() -> usize {
    8
}

fn default_suggestion_min_chars() -> usize {
    2
}

fn default_suggestion_debounce_ms() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for WishlistConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            home_section_limit: default_home_section_limit(),
            similar_limit: default_similar_limit(),
            suggestion_limit: default_suggestion_limit(),
            suggestion_min_chars: default_suggestion_min_chars(),
            suggestion_debounce_ms: default_suggestion_debounce_ms(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or fall back to defaults when it does not exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("api.base_url cannot be empty"));
        }
        if self.api.image_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("api.image_base_url cannot be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(anyhow::anyhow!("api.timeout_secs must be greater than zero"));
        }
        if self.wishlist.storage_key.trim().is_empty() {
            return Err(anyhow::anyhow!("wishlist.storage_key cannot be empty"));
        }

        let limits = [
            ("display.home_section_limit", self.display.home_section_limit),
            ("display.similar_limit", self.display.similar_limit),
            ("display.suggestion_limit", self.display.suggestion_limit),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(anyhow::anyhow!("{} must be greater than zero", name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.api.language = Some("en-US".to_string());
        config.display.home_section_limit = 6;
        config.wishlist.storage_key = "favorites".to_string();

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.api.language.as_deref(), Some("en-US"));
        assert_eq!(loaded.display.home_section_limit, 6);
        assert_eq!(loaded.display.similar_limit, 8);
        assert_eq!(loaded.wishlist.storage_key, "favorites");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[display]\nsuggestion_debounce_ms = 150\n").unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.display.suggestion_debounce_ms, 150);
        assert_eq!(loaded.display.suggestion_min_chars, 2);
        assert_eq!(loaded.api.base_url, "https://api.themoviedb.org/3");
        assert_eq!(loaded.wishlist.storage_key, DEFAULT_WISHLIST_KEY);
        assert!(loaded.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.display.home_section_limit, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.api.timeout_secs = 10;

        config.display.similar_limit = 0;
        assert!(config.validate().is_err());
        config.display.similar_limit = 8;

        config.wishlist.storage_key = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
