use async_trait::async_trait;
use moviedeck_models::{Category, Credits, GenreList, MovieId, MovieRecord, Page, TimeWindow, VideoList};
use crate::error::CatalogError;

/// Read-only movie catalog.
///
/// Every listing is paginated the way the upstream API paginates; page
/// numbers start at 1.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    // Listings
    async fn trending(&self, window: TimeWindow) -> Result<Page<MovieRecord>, CatalogError>;
    async fn category(&self, category: Category, page: u32) -> Result<Page<MovieRecord>, CatalogError>;
    async fn search(&self, query: &str, page: u32) -> Result<Page<MovieRecord>, CatalogError>;
    async fn discover_by_genre(&self, genre_id: u32, page: u32) -> Result<Page<MovieRecord>, CatalogError>;

    // Single movie
    async fn movie_details(&self, id: MovieId) -> Result<MovieRecord, CatalogError>;
    async fn movie_credits(&self, id: MovieId) -> Result<Credits, CatalogError>;
    async fn movie_videos(&self, id: MovieId) -> Result<VideoList, CatalogError>;
    async fn similar_movies(&self, id: MovieId) -> Result<Page<MovieRecord>, CatalogError>;

    // Taxonomy
    async fn genres(&self) -> Result<GenreList, CatalogError>;

    // Convenience wrappers over `category`
    async fn popular(&self, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.category(Category::Popular, page).await
    }

    async fn top_rated(&self, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.category(Category::TopRated, page).await
    }

    async fn now_playing(&self, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.category(Category::NowPlaying, page).await
    }

    async fn upcoming(&self, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.category(Category::Upcoming, page).await
    }
}
