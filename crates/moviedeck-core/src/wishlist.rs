use crate::storage::KeyValueStore;
use moviedeck_config::DEFAULT_WISHLIST_KEY;
use moviedeck_models::{MovieId, MovieRecord};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Whether the durable copy matches the in-memory wishlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    Synced,
    /// The last write failed; in-memory state is ahead of storage until the
    /// next successful write
    Degraded(String),
}

impl PersistenceStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, PersistenceStatus::Degraded(_))
    }
}

/// The user's favorited movies.
///
/// Ordered by insertion, never two entries with the same id. Every mutation
/// that changes the list writes the whole list, as a JSON array, under one
/// storage key. Mutations never fail: a failed write is logged and reflected
/// in [`PersistenceStatus`] while the in-memory list keeps the change.
pub struct WishlistStore<S: KeyValueStore> {
    storage: S,
    key: String,
    movies: Vec<MovieRecord>,
    status: PersistenceStatus,
}

impl<S: KeyValueStore> WishlistStore<S> {
    /// Hydrate from storage under the default `wishlist` key
    pub fn initialize(storage: S) -> Self {
        Self::initialize_with_key(storage, DEFAULT_WISHLIST_KEY)
    }

    /// Hydrate from storage. A missing key, a failed read or a value that is
    /// not a JSON array of movies all start an empty wishlist.
    pub fn initialize_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let movies = load_movies(&storage, &key);
        info!(key = %key, count = movies.len(), "Wishlist initialized");
        Self {
            storage,
            key,
            movies,
            status: PersistenceStatus::Synced,
        }
    }

    /// Append `movie` unless one with the same id is already present.
    /// Returns whether the wishlist changed.
    pub fn add(&mut self, movie: MovieRecord) -> bool {
        if self.contains(movie.id) {
            debug!(id = movie.id, "Movie already in wishlist");
            return false;
        }
        debug!(id = movie.id, title = %movie.title, "Adding movie to wishlist");
        self.movies.push(movie);
        self.persist();
        true
    }

    /// Drop the movie with `id`. Returns whether the wishlist changed.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        if self.movies.len() == before {
            debug!(id, "Movie not in wishlist, nothing to remove");
            return false;
        }
        debug!(id, "Removed movie from wishlist");
        self.persist();
        true
    }

    /// Empty the wishlist. Always writes, even when already empty.
    pub fn clear(&mut self) {
        self.movies.clear();
        self.persist();
    }

    /// Remove `movie` if present, add it otherwise. Returns the new membership.
    pub fn toggle(&mut self, movie: MovieRecord) -> bool {
        if self.remove(movie.id) {
            false
        } else {
            self.add(movie)
        }
    }

    pub fn count(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn persistence_status(&self) -> &PersistenceStatus {
        &self.status
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.movies) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize wishlist: {}", e);
                self.status = PersistenceStatus::Degraded(e.to_string());
                return;
            }
        };

        match self.storage.set(&self.key, &json) {
            Ok(()) => {
                debug!(key = %self.key, count = self.movies.len(), "Wishlist persisted");
                self.status = PersistenceStatus::Synced;
            }
            Err(e) => {
                warn!(key = %self.key, "Failed to persist wishlist, keeping in-memory state: {}", e);
                self.status = PersistenceStatus::Degraded(e.to_string());
            }
        }
    }
}

fn load_movies<S: KeyValueStore>(storage: &S, key: &str) -> Vec<MovieRecord> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted wishlist, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, "Failed to read persisted wishlist, starting empty: {}", e);
            return Vec::new();
        }
    };

    let entries: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, "Persisted wishlist is not valid, starting empty: {}", e);
            return Vec::new();
        }
    };

    // An entry without a usable id is skipped; the rest still load
    let total = entries.len();
    let movies: Vec<MovieRecord> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<MovieRecord>(entry) {
            Ok(movie) => Some(movie),
            Err(e) => {
                debug!(key, "Skipping unreadable wishlist entry: {}", e);
                None
            }
        })
        .collect();
    if movies.len() < total {
        warn!(key, skipped = total - movies.len(), "Skipped unreadable entries in persisted wishlist");
    }

    // Keep the first entry for any repeated id
    let mut seen = HashSet::new();
    let total = movies.len();
    let movies: Vec<MovieRecord> = movies.into_iter().filter(|m| seen.insert(m.id)).collect();
    if movies.len() < total {
        warn!(key, dropped = total - movies.len(), "Dropped duplicate ids from persisted wishlist");
    }
    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_store::FileKeyValueStore;
    use crate::memory_store::MemoryKeyValueStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn movie(id: MovieId, title: &str) -> MovieRecord {
        MovieRecord::new(id, title)
    }

    fn ids<S: KeyValueStore>(store: &WishlistStore<S>) -> Vec<MovieId> {
        store.movies().iter().map(|m| m.id).collect()
    }

    fn persisted_ids(storage: &MemoryKeyValueStore) -> Vec<MovieId> {
        let raw = storage.get("wishlist").unwrap().unwrap();
        let movies: Vec<MovieRecord> = serde_json::from_str(&raw).unwrap();
        movies.into_iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_add_remove_clear_scenario() {
        let mut store = WishlistStore::initialize(MemoryKeyValueStore::new());
        assert_eq!(store.count(), 0);

        assert!(store.add(movie(1, "A")));
        assert!(store.add(movie(2, "B")));
        assert_eq!(store.count(), 2);

        assert!(store.remove(1));
        assert_eq!(store.count(), 1);
        assert!(store.contains(2));
        assert!(!store.contains(1));

        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_add_is_idempotent() {
        let storage = MemoryKeyValueStore::new();
        let mut store = WishlistStore::initialize(storage.clone());

        assert!(store.add(movie(5, "E")));
        let writes = storage.write_count();
        assert!(!store.add(movie(5, "E again")));

        assert_eq!(store.count(), 1);
        assert_eq!(store.get(5).unwrap().title, "E");
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_remove_absent_id_is_a_noop() {
        let storage = MemoryKeyValueStore::new();
        let mut store = WishlistStore::initialize(storage.clone());
        store.add(movie(1, "A"));
        let writes = storage.write_count();

        assert!(!store.remove(42));
        assert_eq!(ids(&store), vec![1]);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_clear_always_persists_empty_array() {
        let storage = MemoryKeyValueStore::new();
        let mut store = WishlistStore::initialize(storage.clone());

        store.clear();
        assert_eq!(storage.get("wishlist").unwrap().as_deref(), Some("[]"));

        store.add(movie(1, "A"));
        store.add(movie(2, "B"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(storage.get("wishlist").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_every_change_writes_full_list() {
        let storage = MemoryKeyValueStore::new();
        let mut store = WishlistStore::initialize(storage.clone());

        store.add(movie(3, "C"));
        store.add(movie(1, "A"));
        store.add(movie(2, "B"));
        assert_eq!(persisted_ids(&storage), vec![3, 1, 2]);

        store.remove(1);
        assert_eq!(persisted_ids(&storage), vec![3, 2]);
        assert_eq!(storage.write_count(), 4);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = WishlistStore::initialize(MemoryKeyValueStore::new());
        for id in [9, 4, 7, 1] {
            store.add(movie(id, "x"));
        }
        store.remove(7);
        store.add(movie(4, "dup"));
        store.add(movie(7, "back"));
        assert_eq!(ids(&store), vec![9, 4, 1, 7]);
    }

    #[test]
    fn test_no_duplicate_ids_across_mixed_operations() {
        let mut store = WishlistStore::initialize(MemoryKeyValueStore::new());
        // Deterministic pseudo-random walk over a small id space
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let id = seed % 10;
            match seed % 7 {
                0 => store.clear(),
                1 | 2 => {
                    store.remove(id);
                }
                3 => {
                    store.toggle(movie(id, "t"));
                }
                _ => {
                    store.add(movie(id, "a"));
                }
            }

            let mut unique = ids(&store);
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), store.count());
        }
    }

    #[test]
    fn test_round_trip_through_persistence() {
        let storage = MemoryKeyValueStore::new();
        let mut first = MovieRecord::new(1, "A");
        first.extra.insert("original_language".to_string(), json!("fr"));
        first.poster_path = Some("/a.jpg".to_string());
        let second = MovieRecord::new(2, "B");

        {
            let mut session = WishlistStore::initialize(storage.clone());
            session.add(first.clone());
            session.add(second.clone());
        }

        let next_session = WishlistStore::initialize(storage);
        assert_eq!(next_session.movies(), &[first, second]);
        assert_eq!(
            next_session.get(1).unwrap().extra.get("original_language"),
            Some(&json!("fr"))
        );
    }

    #[test]
    fn test_corrupt_persisted_value_starts_empty() {
        let storage = MemoryKeyValueStore::with_entry("wishlist", "{{not json at all");
        let mut store = WishlistStore::initialize(storage.clone());
        assert_eq!(store.count(), 0);
        assert_eq!(store.persistence_status(), &PersistenceStatus::Synced);

        // First change overwrites the corrupt value
        store.add(movie(1, "A"));
        assert_eq!(persisted_ids(&storage), vec![1]);
    }

    #[test]
    fn test_wrong_shape_persisted_value_starts_empty() {
        let storage = MemoryKeyValueStore::with_entry("wishlist", r#"{"movies": []}"#);
        assert!(WishlistStore::initialize(storage).is_empty());

        let storage = MemoryKeyValueStore::with_entry("wishlist", r#"[{"title": "no id"}]"#);
        assert!(WishlistStore::initialize(storage).is_empty());
    }

    #[test]
    fn test_malformed_entry_does_not_lose_the_others() {
        let raws = [
            json!([{"id": 1, "title": "A"}, {"id": 2, "title": null}]),
            json!([{"id": 1, "title": "A"}, {"id": 2, "overview": null}]),
            json!([{"id": 1, "title": "A"}, {"id": 2, "vote_count": 12.0}]),
            json!([{"id": 1, "title": "A"}, {"id": 2, "runtime": -1}]),
        ];

        for raw in raws {
            let storage = MemoryKeyValueStore::with_entry("wishlist", &raw.to_string());
            let mut store = WishlistStore::initialize(storage.clone());
            assert_eq!(ids(&store), vec![1, 2], "loading {}", raw);

            store.add(movie(3, "C"));
            assert_eq!(persisted_ids(&storage), vec![1, 2, 3], "after add over {}", raw);
        }
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let raw = json!([{"title": "no id"}, {"id": 1, "title": "A"}, "junk", {"id": "x"}]).to_string();
        let store = WishlistStore::initialize(MemoryKeyValueStore::with_entry("wishlist", &raw));
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn test_persisted_duplicates_are_collapsed() {
        let raw = json!([
            {"id": 1, "title": "first"},
            {"id": 2, "title": "B"},
            {"id": 1, "title": "second"}
        ])
        .to_string();
        let store = WishlistStore::initialize(MemoryKeyValueStore::with_entry("wishlist", &raw));
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.get(1).unwrap().title, "first");
    }

    #[test]
    fn test_toggle() {
        let mut store = WishlistStore::initialize(MemoryKeyValueStore::new());
        assert!(store.toggle(movie(3, "C")));
        assert!(store.contains(3));
        assert!(!store.toggle(movie(3, "C")));
        assert!(!store.contains(3));
    }

    #[test]
    fn test_failed_write_keeps_memory_state_and_reports_degraded() {
        let storage = MemoryKeyValueStore::new();
        let mut store = WishlistStore::initialize(storage.clone());
        store.add(movie(1, "A"));

        storage.set_read_only(true);
        assert!(store.add(movie(2, "B")));
        assert_eq!(ids(&store), vec![1, 2]);
        assert!(store.persistence_status().is_degraded());
        assert_eq!(persisted_ids(&storage), vec![1]);

        // Next successful write catches the durable copy up
        storage.set_read_only(false);
        store.remove(1);
        assert_eq!(store.persistence_status(), &PersistenceStatus::Synced);
        assert_eq!(persisted_ids(&storage), vec![2]);
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryKeyValueStore::new();
        let mut store = WishlistStore::initialize_with_key(storage.clone(), "favorites");
        store.add(movie(1, "A"));
        assert_eq!(store.storage_key(), "favorites");
        assert!(storage.get("favorites").unwrap().is_some());
        assert!(storage.get("wishlist").unwrap().is_none());
    }

    #[test]
    fn test_file_backed_sessions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut session = WishlistStore::initialize(FileKeyValueStore::new(&path));
        session.add(movie(10, "J"));
        session.add(movie(11, "K"));
        session.remove(10);
        drop(session);

        let session = WishlistStore::initialize(FileKeyValueStore::new(&path));
        assert_eq!(ids(&session), vec![11]);
        assert_eq!(session.get(11).unwrap().title, "K");
    }
}
