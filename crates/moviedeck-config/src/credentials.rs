use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable that takes precedence over the stored API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

const API_KEY: &str = "tmdb_api_key";
const API_KEY_UPDATED: &str = "tmdb_api_key_updated_at";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_all_keys(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }

    pub fn get_api_key(&self) -> Option<&String> {
        self.get(API_KEY)
    }

    /// Store the API key and remember when it was set
    pub fn set_api_key(&mut self, key: String) {
        self.set(API_KEY.to_string(), key);
        self.set(API_KEY_UPDATED.to_string(), Utc::now().to_rfc3339());
    }

    pub fn clear_api_key(&mut self) {
        self.remove(API_KEY);
        self.remove(API_KEY_UPDATED);
    }

    pub fn get_api_key_updated_at(&self) -> Option<DateTime<Utc>> {
        self.get(API_KEY_UPDATED)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// API key to use for requests: `TMDB_API_KEY` wins over the stored key
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key_with(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| self.get_api_key().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_api_key("abc123".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_api_key(), Some(&"abc123".to_string()));

        let updated = loaded_store.get_api_key_updated_at().unwrap();
        assert!((Utc::now() - updated).num_seconds().abs() < 5);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let mut store = CredentialStore::new(PathBuf::from("/nonexistent/moviedeck/credentials.toml"));
        store.load().unwrap();
        assert!(store.get_all_keys().is_empty());
    }

    #[test]
    fn test_env_key_takes_precedence() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_api_key("stored".to_string());

        assert_eq!(store.resolve_api_key_with(Some("from-env".to_string())).as_deref(), Some("from-env"));
        assert_eq!(store.resolve_api_key_with(Some("   ".to_string())).as_deref(), Some("stored"));
        assert_eq!(store.resolve_api_key_with(None).as_deref(), Some("stored"));

        store.clear_api_key();
        assert_eq!(store.resolve_api_key_with(None), None);
        assert!(store.get_api_key_updated_at().is_none());
    }
}
