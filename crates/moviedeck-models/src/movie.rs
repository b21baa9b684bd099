use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::genre::Genre;
use crate::lenient;

pub type MovieId = u64;

/// A catalog entry as returned by the movie API.
///
/// List endpoints fill the summary fields only; the detail endpoint also fills
/// the optional attributes (runtime, budget, genres, ...). Anything the API
/// returns that is not modelled here is kept in `extra` so the record survives
/// a persistence round trip unchanged. Only `id` is required to have the right
/// shape; any other field of the wrong type decodes as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "lenient::unsigned")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub overview: String,

    // Detail-view attributes
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_unsigned", skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_unsigned", skip_serializing_if = "Option::is_none")]
    pub revenue: Option<u64>,
    #[serde(default, deserialize_with = "lenient::vec", skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_float", skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,

    /// Fields we don't model, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieRecord {
    /// Minimal record, mostly useful for tests and for ids typed by hand
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            vote_count: 0,
            overview: String::new(),
            runtime: None,
            budget: None,
            revenue: None,
            genres: Vec::new(),
            tagline: None,
            status: None,
            popularity: None,
            extra: Map::new(),
        }
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref().and_then(crate::format::release_year)
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_entry_deserializes_with_extra_fields() {
        let value = json!({
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": null,
            "vote_average": 8.4,
            "vote_count": 26280,
            "overview": "A ticking-time-bomb insomniac...",
            "genre_ids": [18, 53],
            "adult": false
        });

        let movie: MovieRecord = serde_json::from_value(value).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.runtime, None);
        assert_eq!(movie.extra.get("genre_ids"), Some(&json!([18, 53])));
        assert_eq!(movie.extra.get("adult"), Some(&json!(false)));
    }

    #[test]
    fn test_extra_fields_survive_serialization() {
        let value = json!({
            "id": 1,
            "title": "A",
            "original_language": "en",
            "video": false
        });

        let movie: MovieRecord = serde_json::from_value(value).unwrap();
        let text = serde_json::to_string(&movie).unwrap();
        let back: MovieRecord = serde_json::from_str(&text).unwrap();

        assert_eq!(back, movie);
        assert_eq!(back.extra.get("original_language"), Some(&json!("en")));
    }

    #[test]
    fn test_detail_fields() {
        let value = json!({
            "id": 27205,
            "title": "Inception",
            "runtime": 148,
            "budget": 160000000u64,
            "revenue": 825532764u64,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "tagline": "Your mind is the scene of the crime.",
            "status": "Released",
            "popularity": 83.9
        });

        let movie: MovieRecord = serde_json::from_value(value).unwrap();
        assert_eq!(movie.status.as_deref(), Some("Released"));
        assert_eq!(movie.genre_names(), vec!["Action", "Science Fiction"]);
        assert_eq!(movie.runtime, Some(148));
        assert!(movie.extra.is_empty());
    }

    #[test]
    fn test_wrongly_shaped_fields_decode_as_empty() {
        let value = json!({
            "id": 2,
            "title": null,
            "overview": null,
            "vote_average": "high",
            "vote_count": 12.0,
            "release_date": 1999,
            "runtime": -1,
            "budget": 1.5,
            "genres": [{"id": 28, "name": "Action"}, {"id": "x"}],
            "tagline": false
        });

        let movie: MovieRecord = serde_json::from_value(value).unwrap();
        assert_eq!(movie.id, 2);
        assert_eq!(movie.title, "");
        assert_eq!(movie.overview, "");
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.vote_count, 12);
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.runtime, None);
        assert_eq!(movie.budget, None);
        assert_eq!(movie.genre_names(), vec!["Action"]);
        assert_eq!(movie.tagline, None);
    }

    #[test]
    fn test_missing_or_bad_id_is_rejected() {
        assert!(serde_json::from_value::<MovieRecord>(json!({"title": "A"})).is_err());
        assert!(serde_json::from_value::<MovieRecord>(json!({"id": "7", "title": "A"})).is_err());
    }

    #[test]
    fn test_minimal_record_serializes_summary_shape() {
        let movie = MovieRecord::new(5, "E");
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], json!(5));
        assert_eq!(value["poster_path"], Value::Null);
        assert!(value.get("runtime").is_none());
        assert!(value.get("genres").is_none());
    }
}
