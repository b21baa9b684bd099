//! Composed catalog views: the home feed, a movie's detail page, a genre
//! category and plain search. Each view fans out its requests concurrently.

use moviedeck_models::{Credits, MovieId, MovieRecord, Page, TimeWindow, Video};
use moviedeck_sources::{CatalogError, CatalogSource};
use serde::Serialize;
use tracing::debug;

const UNKNOWN_CATEGORY: &str = "Category";

#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    /// Featured movie: first trending, else first popular
    pub hero: Option<MovieRecord>,
    pub trending: Vec<MovieRecord>,
    pub popular: Vec<MovieRecord>,
    pub top_rated: Vec<MovieRecord>,
    pub now_playing: Vec<MovieRecord>,
}

pub async fn load_home_feed<C>(catalog: &C, section_limit: usize) -> Result<HomeFeed, CatalogError>
where
    C: CatalogSource + ?Sized,
{
    let (trending, popular, top_rated, now_playing) = futures::try_join!(
        catalog.trending(TimeWindow::Week),
        catalog.popular(1),
        catalog.top_rated(1),
        catalog.now_playing(1),
    )?;

    let trending = trending.truncated(section_limit).results;
    let popular = popular.truncated(section_limit).results;
    let hero = trending.first().or_else(|| popular.first()).cloned();

    debug!(
        trending = trending.len(),
        popular = popular.len(),
        "Home feed loaded"
    );

    Ok(HomeFeed {
        hero,
        trending,
        popular,
        top_rated: top_rated.truncated(section_limit).results,
        now_playing: now_playing.truncated(section_limit).results,
    })
}

/// Optional sections of the detail view
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailExtras {
    pub credits: bool,
    pub videos: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieDetailView {
    pub movie: MovieRecord,
    pub similar: Vec<MovieRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer: Option<Video>,
}

pub async fn load_movie_detail<C>(
    catalog: &C,
    id: MovieId,
    similar_limit: usize,
    extras: DetailExtras,
) -> Result<MovieDetailView, CatalogError>
where
    C: CatalogSource + ?Sized,
{
    let credits = async {
        if extras.credits {
            catalog.movie_credits(id).await.map(Some)
        } else {
            Ok(None)
        }
    };
    let videos = async {
        if extras.videos {
            catalog.movie_videos(id).await.map(Some)
        } else {
            Ok(None)
        }
    };

    let (movie, similar, credits, videos) =
        futures::try_join!(catalog.movie_details(id), catalog.similar_movies(id), credits, videos)?;

    Ok(MovieDetailView {
        movie,
        similar: similar.truncated(similar_limit).results,
        credits,
        trailer: videos.and_then(|v| v.trailer().cloned()),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub genre_id: u32,
    pub genre_name: String,
    pub page: Page<MovieRecord>,
}

pub async fn load_category<C>(catalog: &C, genre_id: u32, page: u32) -> Result<CategoryView, CatalogError>
where
    C: CatalogSource + ?Sized,
{
    let (movies, genres) = futures::try_join!(catalog.discover_by_genre(genre_id, page), catalog.genres())?;

    let genre_name = genres
        .find(genre_id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

    Ok(CategoryView {
        genre_id,
        genre_name,
        page: movies,
    })
}

/// Search by title. A blank query returns an empty page without a request.
pub async fn search<C>(catalog: &C, query: &str, page: u32) -> Result<Page<MovieRecord>, CatalogError>
where
    C: CatalogSource + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(Page::empty());
    }
    catalog.search(query, page).await
}
