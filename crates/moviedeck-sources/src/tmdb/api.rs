use crate::error::CatalogError;
use moviedeck_models::{Category, Credits, GenreList, MovieId, MovieRecord, Page, TimeWindow, VideoList};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Base URL plus the query parameters every request carries
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl ApiEndpoint {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, language: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language,
        }
    }

    /// Full request URL for `path` with `params` appended, values URL-encoded
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, path, urlencoding::encode(&self.api_key));
        if let Some(language) = &self.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

/// Pages start at 1; anything lower is clamped
fn page_param(page: u32) -> (&'static str, String) {
    ("page", page.max(1).to_string())
}

/// GET `path` and decode the JSON body.
///
/// Errors carry only the path, never the full URL, so the API key does not end
/// up in logs.
async fn fetch<T: DeserializeOwned>(
    client: &Client,
    endpoint: &ApiEndpoint,
    path: &str,
    params: &[(&str, String)],
) -> Result<T, CatalogError> {
    let url = endpoint.url(path, params);
    debug!(path, "Fetching catalog endpoint");

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| CatalogError::Http {
            endpoint: path.to_string(),
            source: e.without_url(),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), "Catalog request failed");
        return Err(CatalogError::Status {
            endpoint: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await.map_err(|e| CatalogError::Http {
        endpoint: path.to_string(),
        source: e.without_url(),
    })?;

    serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
        endpoint: path.to_string(),
        source,
    })
}

pub fn trending_path(window: TimeWindow) -> String {
    format!("/trending/movie/{}", window.as_str())
}

pub fn category_path(category: Category) -> String {
    format!("/movie/{}", category.path_segment())
}

pub fn movie_path(id: MovieId) -> String {
    format!("/movie/{}", id)
}

pub const SEARCH_PATH: &str = "/search/movie";
pub const DISCOVER_PATH: &str = "/discover/movie";
pub const GENRES_PATH: &str = "/genre/movie/list";

pub async fn get_trending(client: &Client, endpoint: &ApiEndpoint, window: TimeWindow) -> Result<Page<MovieRecord>, CatalogError> {
    fetch(client, endpoint, &trending_path(window), &[]).await
}

pub async fn get_category(
    client: &Client,
    endpoint: &ApiEndpoint,
    category: Category,
    page: u32,
) -> Result<Page<MovieRecord>, CatalogError> {
    fetch(client, endpoint, &category_path(category), &[page_param(page)]).await
}

pub async fn search_movies(client: &Client, endpoint: &ApiEndpoint, query: &str, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
    let params = [("query", query.to_string()), page_param(page)];
    fetch(client, endpoint, SEARCH_PATH, &params).await
}

pub async fn discover_by_genre(
    client: &Client,
    endpoint: &ApiEndpoint,
    genre_id: u32,
    page: u32,
) -> Result<Page<MovieRecord>, CatalogError> {
    let params = [("with_genres", genre_id.to_string()), page_param(page)];
    fetch(client, endpoint, DISCOVER_PATH, &params).await
}

pub async fn get_movie_details(client: &Client, endpoint: &ApiEndpoint, id: MovieId) -> Result<MovieRecord, CatalogError> {
    fetch(client, endpoint, &movie_path(id), &[]).await
}

pub async fn get_movie_credits(client: &Client, endpoint: &ApiEndpoint, id: MovieId) -> Result<Credits, CatalogError> {
    fetch(client, endpoint, &format!("{}/credits", movie_path(id)), &[]).await
}

pub async fn get_movie_videos(client: &Client, endpoint: &ApiEndpoint, id: MovieId) -> Result<VideoList, CatalogError> {
    fetch(client, endpoint, &format!("{}/videos", movie_path(id)), &[]).await
}

pub async fn get_similar_movies(client: &Client, endpoint: &ApiEndpoint, id: MovieId) -> Result<Page<MovieRecord>, CatalogError> {
    fetch(client, endpoint, &format!("{}/similar", movie_path(id)), &[]).await
}

pub async fn get_genres(client: &Client, endpoint: &ApiEndpoint) -> Result<GenreList, CatalogError> {
    fetch(client, endpoint, GENRES_PATH, &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> ApiEndpoint {
        ApiEndpoint::new("https://api.themoviedb.org/3/", "key123", None)
    }

    #[test]
    fn test_url_with_page() {
        let url = endpoint().url(&category_path(Category::TopRated), &[page_param(2)]);
        assert_eq!(url, "https://api.themoviedb.org/3/movie/top_rated?api_key=key123&page=2");
    }

    #[test]
    fn test_page_zero_is_clamped() {
        assert_eq!(page_param(0), ("page", "1".to_string()));
    }

    #[test]
    fn test_search_query_is_encoded() {
        let params = [("query", "the matrix & co".to_string()), page_param(1)];
        let url = endpoint().url(SEARCH_PATH, &params);
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/search/movie?api_key=key123&query=the%20matrix%20%26%20co&page=1"
        );
    }

    #[test]
    fn test_language_param() {
        let endpoint = ApiEndpoint::new("https://api.themoviedb.org/3", "k", Some("pt-BR".to_string()));
        let url = endpoint.url(GENRES_PATH, &[]);
        assert_eq!(url, "https://api.themoviedb.org/3/genre/movie/list?api_key=k&language=pt-BR");
    }

    #[test]
    fn test_paths() {
        assert_eq!(trending_path(TimeWindow::Day), "/trending/movie/day");
        assert_eq!(trending_path(TimeWindow::default()), "/trending/movie/week");
        assert_eq!(category_path(Category::NowPlaying), "/movie/now_playing");
        assert_eq!(category_path(Category::Upcoming), "/movie/upcoming");
        assert_eq!(movie_path(550), "/movie/550");
    }
}
