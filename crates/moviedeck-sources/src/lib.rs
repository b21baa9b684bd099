pub mod error;
pub mod images;
pub mod tmdb;
pub mod traits;

pub use error::CatalogError;
pub use images::{ImageUrls, DEFAULT_BACKDROP_SIZE, DEFAULT_POSTER_SIZE};
pub use tmdb::TmdbClient;
pub use traits::CatalogSource;
