pub mod discover;
pub mod file_store;
pub mod memory_store;
pub mod storage;
pub mod suggest;
pub mod wishlist;

#[cfg(test)]
mod testing;

pub use discover::{load_category, load_home_feed, load_movie_detail, search, CategoryView, DetailExtras, HomeFeed, MovieDetailView};
pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
pub use storage::{KeyValueStore, StorageError};
pub use suggest::{suggest, SuggestionDebouncer, SuggestionSettings, Suggestions};
pub use wishlist::{PersistenceStatus, WishlistStore};
