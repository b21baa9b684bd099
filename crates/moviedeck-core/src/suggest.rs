//! Search-as-you-type suggestions.
//!
//! [`suggest`] answers a single query. [`SuggestionDebouncer`] sits in front
//! of it for a stream of query edits and only looks up a query once no newer
//! one has arrived for the debounce window.

use moviedeck_config::DisplayConfig;
use moviedeck_models::MovieRecord;
use moviedeck_sources::CatalogSource;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SuggestionSettings {
    pub min_chars: usize,
    pub limit: usize,
    pub debounce: Duration,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for SuggestionSettings {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            min_chars: display.suggestion_min_chars,
            limit: display.suggestion_limit,
            debounce: Duration::from_millis(display.suggestion_debounce_ms),
        }
    }
}

impl SuggestionSettings {
    fn accepts(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_chars
    }
}

/// Top search hits for `query`.
///
/// Too-short queries yield nothing without a request; lookup failures are
/// logged and yield nothing as well.
pub async fn suggest<C>(catalog: &C, query: &str, settings: &SuggestionSettings) -> Vec<MovieRecord>
where
    C: CatalogSource + ?Sized,
{
    if !settings.accepts(query) {
        return Vec::new();
    }

    match catalog.search(query.trim(), 1).await {
        Ok(page) => page.truncated(settings.limit).results,
        Err(e) => {
            warn!("Failed to fetch suggestions for {:?}: {}", query.trim(), e);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestions {
    pub query: String,
    pub movies: Vec<MovieRecord>,
}

/// Debounced suggestion lookups running on a background task.
///
/// Queries go in through [`push`](Self::push); results come out of
/// [`next`](Self::next). A too-short query clears suggestions right away and
/// cancels any pending lookup. Closing the input flushes the last pending
/// query before the task ends.
pub struct SuggestionDebouncer {
    queries: Option<mpsc::UnboundedSender<String>>,
    results: mpsc::UnboundedReceiver<Suggestions>,
    task: JoinHandle<()>,
}

impl SuggestionDebouncer {
    pub fn spawn(catalog: Arc<dyn CatalogSource>, settings: SuggestionSettings) -> Self {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_debouncer(catalog, settings, query_rx, result_tx));
        Self {
            queries: Some(query_tx),
            results: result_rx,
            task,
        }
    }

    /// Returns false once the input has been closed
    pub fn push(&self, query: impl Into<String>) -> bool {
        match &self.queries {
            Some(tx) => tx.send(query.into()).is_ok(),
            None => false,
        }
    }

    /// Stop accepting queries; pending work still completes
    pub fn close(&mut self) {
        self.queries = None;
    }

    /// Next batch of suggestions, `None` after the input is closed and drained
    pub async fn next(&mut self) -> Option<Suggestions> {
        self.results.recv().await
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_debouncer(
    catalog: Arc<dyn CatalogSource>,
    settings: SuggestionSettings,
    mut queries: mpsc::UnboundedReceiver<String>,
    results: mpsc::UnboundedSender<Suggestions>,
) {
    let mut pending: Option<String> = None;

    loop {
        let next = match pending.take() {
            None => match queries.recv().await {
                Some(query) => query,
                None => break,
            },
            Some(query) => {
                tokio::select! {
                    newer = queries.recv() => match newer {
                        Some(newer) => {
                            debug!("Suggestion query {:?} superseded by {:?}", query, newer);
                            newer
                        }
                        None => {
                            lookup(&*catalog, &settings, query, &results).await;
                            break;
                        }
                    },
                    _ = tokio::time::sleep(settings.debounce) => {
                        lookup(&*catalog, &settings, query, &results).await;
                        continue;
                    }
                }
            }
        };

        if settings.accepts(&next) {
            pending = Some(next);
        } else if results.send(Suggestions { query: next, movies: Vec::new() }).is_err() {
            break;
        }
    }
}

async fn lookup(
    catalog: &dyn CatalogSource,
    settings: &SuggestionSettings,
    query: String,
    results: &mpsc::UnboundedSender<Suggestions>,
) {
    let movies = suggest(catalog, &query, settings).await;
    debug!("{} suggestions for {:?}", movies.len(), query);
    let _ = results.send(Suggestions { query, movies });
}
