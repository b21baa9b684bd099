//! In-process catalog used by the async tests in this crate.

use async_trait::async_trait;
use moviedeck_models::{Category, Credits, Genre, GenreList, MovieId, MovieRecord, Page, TimeWindow, Video, VideoList};
use moviedeck_sources::{CatalogError, CatalogSource};
use std::sync::Mutex;

pub struct FakeCatalog {
    pub calls: Mutex<Vec<String>>,
    pub fail: bool,
    /// Listings (`trending`, `popular`, ...) that come back with no results
    pub empty: Vec<&'static str>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
            empty: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
            empty: Vec::new(),
        }
    }

    pub fn with_empty(listings: &[&'static str]) -> Self {
        Self {
            empty: listings.to_vec(),
            ..Self::new()
        }
    }

    fn listing(&self, name: &str, start: MovieId) -> Page<MovieRecord> {
        if self.empty.iter().any(|listing| *listing == name) {
            Page::empty()
        } else {
            Self::page(start, 20)
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), CatalogError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.fail {
            return Err(CatalogError::Status {
                endpoint: call,
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }

    /// `count` movies with ids `start..start + count`
    fn page(start: MovieId, count: u64) -> Page<MovieRecord> {
        Page {
            page: 1,
            results: (start..start + count).map(|id| MovieRecord::new(id, format!("Movie {}", id))).collect(),
            total_pages: 5,
            total_results: 100,
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn trending(&self, window: TimeWindow) -> Result<Page<MovieRecord>, CatalogError> {
        self.record(format!("trending:{}", window))?;
        Ok(self.listing("trending", 100))
    }

    async fn category(&self, category: Category, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.record(format!("{}:{}", category.path_segment(), page))?;
        let start = match category {
            Category::Popular => 200,
            Category::TopRated => 300,
            Category::NowPlaying => 400,
            Category::Upcoming => 500,
        };
        Ok(self.listing(category.path_segment(), start))
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.record(format!("search:{}:{}", query, page))?;
        Ok(Self::page(600, 20))
    }

    async fn discover_by_genre(&self, genre_id: u32, page: u32) -> Result<Page<MovieRecord>, CatalogError> {
        self.record(format!("discover:{}:{}", genre_id, page))?;
        Ok(Self::page(700, 20))
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieRecord, CatalogError> {
        self.record(format!("details:{}", id))?;
        let mut movie = MovieRecord::new(id, format!("Movie {}", id));
        movie.runtime = Some(120);
        Ok(movie)
    }

    async fn movie_credits(&self, id: MovieId) -> Result<Credits, CatalogError> {
        self.record(format!("credits:{}", id))?;
        Ok(Credits { id, ..Credits::default() })
    }

    async fn movie_videos(&self, id: MovieId) -> Result<VideoList, CatalogError> {
        self.record(format!("videos:{}", id))?;
        Ok(VideoList {
            id,
            results: vec![Video {
                key: "abc".to_string(),
                name: "Official Trailer".to_string(),
                site: "YouTube".to_string(),
                video_type: "Trailer".to_string(),
                official: true,
            }],
        })
    }

    async fn similar_movies(&self, id: MovieId) -> Result<Page<MovieRecord>, CatalogError> {
        self.record(format!("similar:{}", id))?;
        Ok(Self::page(800, 20))
    }

    async fn genres(&self) -> Result<GenreList, CatalogError> {
        self.record("genres".to_string())?;
        Ok(GenreList {
            genres: vec![
                Genre { id: 28, name: "Action".to_string() },
                Genre { id: 35, name: "Comedy".to_string() },
            ],
        })
    }
}
