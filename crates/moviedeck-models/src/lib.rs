pub mod credits;
pub mod format;
pub mod genre;
pub mod lenient;
pub mod listing;
pub mod movie;
pub mod page;
pub mod video;

pub use credits::{CastMember, Credits, CrewMember};
pub use genre::{Genre, GenreList};
pub use listing::{Category, TimeWindow};
pub use movie::{MovieId, MovieRecord};
pub use page::Page;
pub use video::{Video, VideoList};
