use crate::error::CatalogError;
use crate::images::ImageUrls;
use crate::tmdb::api::{self, ApiEndpoint};
use crate::tmdb::http::create_tmdb_client;
use crate::traits::CatalogSource;
use async_trait::async_trait;
use moviedeck_config::{ApiConfig, Config, CredentialStore};
use moviedeck_models::{Category, Credits, GenreList, MovieId, MovieRecord, Page, TimeWindow, VideoList};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    endpoint: ApiEndpoint,
    images: ImageUrls,
}

impl TmdbClient {
    pub fn new(api: &ApiConfig, api_key: String) -> Result<Self, CatalogError> {
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let client = create_tmdb_client(Duration::from_secs(api.timeout_secs))?;
        Ok(Self {
            client: Arc::new(client),
            endpoint: ApiEndpoint::new(api.base_url.clone(), api_key, api.language.clone()),
            images: ImageUrls::new(api.image_base_url.clone()),
        })
    }

    /// Build a client from the loaded config, taking the key from the
    /// environment or the credential store
    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self, CatalogError> {
        let api_key = credentials.resolve_api_key().ok_or(CatalogError::MissingApiKey)?;
        debug!(base_url = %config.api.base_url, "Creating TMDB client");
        Self::new(&config.api, api_key)
    }

    pub fn images(&self) -> &ImageUrls {
        &self.images
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn trending(&self, window: TimeWindow) -> Result<Page<MovieRecord>, CatalogError> {
        api::get_trending(&self.client, &self.endpoint, window).await
    }

    async fn category(&self, category: Category, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        api::get_category(&self.client, &self.endpoint, category, page).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        api::search_movies(&self.client, &self.endpoint, query, page).await
    }

    async fn discover_by_genre(&self, genre_id: u32, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        api::discover_by_genre(&self.client, &self.endpoint, genre_id, page).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieRecord, CatalogError> {
        api::get_movie_details(&self.client, &self.endpoint, id).await
    }

    async fn movie_credits(&self, id: MovieId) -> Result<Credits, CatalogError> {
        api::get_movie_credits(&self.client, &self.endpoint, id).await
    }

    async fn movie_videos(&self, id: MovieId) -> Result<VideoList, CatalogError> {
        api::get_movie_videos(&self.client, &self.endpoint, id).await
    }

    async fn similar_movies(&self, id: MovieId) -> Result<Page<MovieRecord>, CatalogError> {
        api::get_similar_movies(&self.client, &self.endpoint, id).await
    }

    async fn genres(&self) -> Result<GenreList, CatalogError> {
        api::get_genres(&self.client, &self.endpoint).await
    }
}
