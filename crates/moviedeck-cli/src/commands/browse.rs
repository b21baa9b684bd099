use super::context::{explain_catalog_error, AppContext};
use super::progress::with_spinner;
use super::render;
use crate::output::Output;
use color_eyre::Result;
use moviedeck_core::{
    load_category, load_home_feed, load_movie_detail, search, suggest, DetailExtras, SuggestionDebouncer,
    SuggestionSettings, Suggestions,
};
use moviedeck_models::{Category, MovieId, TimeWindow};
use moviedeck_sources::{CatalogSource, TmdbClient};
use std::collections::HashSet;
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Ids currently in the wishlist, used to mark movies in listings
fn saved_ids(context: &AppContext) -> HashSet<MovieId> {
    match context.open_wishlist() {
        Ok(wishlist) => wishlist.movies().iter().map(|m| m.id).collect(),
        Err(e) => {
            warn!("Could not open wishlist: {}", e);
            HashSet::new()
        }
    }
}

pub async fn run_home(context: &AppContext, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;
    let limit = context.config.display.home_section_limit;

    let feed = with_spinner(output, "Loading movies...", load_home_feed(&catalog, limit))
        .await
        .map_err(explain_catalog_error)?;

    let saved = saved_ids(context);
    output.emit(&feed, || render::home_feed(&feed, catalog.images(), &saved));
    Ok(())
}

pub async fn run_list(context: &AppContext, category: Category, page: u32, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;

    let movies = with_spinner(
        output,
        &format!("Loading {} movies...", category.label()),
        catalog.category(category, page),
    )
    .await
    .map_err(explain_catalog_error)?;

    let saved = saved_ids(context);
    output.emit(&movies, || render::movie_page(category.label(), &movies, &saved));
    Ok(())
}

pub async fn run_trending(context: &AppContext, window: TimeWindow, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;

    let movies = with_spinner(output, "Loading trending movies...", catalog.trending(window))
        .await
        .map_err(explain_catalog_error)?;

    let title = match window {
        TimeWindow::Day => "Trending Today",
        TimeWindow::Week => "Trending This Week",
    };
    let saved = saved_ids(context);
    output.emit(&movies, || render::movie_page(title, &movies, &saved));
    Ok(())
}

pub async fn run_search(context: &AppContext, query: &str, page: u32, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        output.warn("Enter a movie title to search for");
        return Ok(());
    }

    let catalog = context.catalog()?;
    let results = with_spinner(output, &format!("Searching for \"{}\"...", query.trim()), search(&catalog, query, page))
        .await
        .map_err(explain_catalog_error)?;

    let title = format!("Search results for \"{}\"", query.trim());
    let saved = saved_ids(context);
    output.emit(&results, || render::movie_page(&title, &results, &saved));
    Ok(())
}

pub async fn run_suggest(context: &AppContext, query: Option<String>, stdin: bool, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;
    let settings = SuggestionSettings::from(&context.config.display);

    if !stdin {
        let query = query.unwrap_or_default();
        let movies = suggest(&catalog, &query, &settings).await;
        let batch = Suggestions { query, movies };
        output.emit(&batch, || render::suggestions(&batch));
        return Ok(());
    }

    stream_suggestions(Arc::new(catalog), settings, output).await
}

/// Treat every stdin line as the latest state of the query and print
/// debounced suggestions as they arrive
async fn stream_suggestions(catalog: Arc<TmdbClient>, settings: SuggestionSettings, output: &Output) -> Result<()> {
    let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read query from stdin: {}", e);
                    break;
                }
            }
        }
    });

    let catalog: Arc<dyn CatalogSource> = catalog;
    let mut debouncer = SuggestionDebouncer::spawn(catalog, settings);
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.recv(), if input_open => match line {
                Some(line) => {
                    debug!(query = %line, "Suggestion query");
                    debouncer.push(line);
                }
                None => {
                    input_open = false;
                    debouncer.close();
                }
            },
            batch = debouncer.next() => match batch {
                Some(batch) => output.emit(&batch, || render::suggestions(&batch)),
                None => break,
            },
        }
    }

    Ok(())
}

pub async fn run_genres(context: &AppContext, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;
    let genres = with_spinner(output, "Loading genres...", catalog.genres())
        .await
        .map_err(explain_catalog_error)?;
    output.emit(&genres, || render::genres(&genres));
    Ok(())
}

pub async fn run_category(context: &AppContext, genre_id: u32, page: u32, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;
    let view = with_spinner(output, "Loading movies...", load_category(&catalog, genre_id, page))
        .await
        .map_err(explain_catalog_error)?;

    let saved = saved_ids(context);
    output.emit(&view, || render::category(&view, &saved));
    Ok(())
}

pub async fn run_show(context: &AppContext, id: MovieId, credits: bool, videos: bool, output: &Output) -> Result<()> {
    let catalog = context.catalog()?;
    let extras = DetailExtras { credits, videos };

    let view = match with_spinner(
        output,
        "Loading movie details...",
        load_movie_detail(&catalog, id, context.config.display.similar_limit, extras),
    )
    .await
    {
        Ok(view) => view,
        Err(e) if e.is_not_found() => {
            return Err(color_eyre::eyre::eyre!("Movie {} not found", id));
        }
        Err(e) => return Err(explain_catalog_error(e)),
    };

    let saved = saved_ids(context);
    output.emit(&view, || render::movie_detail(&view, catalog.images(), &saved));
    Ok(())
}
