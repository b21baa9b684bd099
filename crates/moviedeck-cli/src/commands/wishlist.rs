use super::context::{explain_catalog_error, AppContext};
use super::progress::{is_interactive, with_spinner};
use super::{prompts, render};
use crate::output::Output;
use crate::WishlistCommands;
use color_eyre::Result;
use moviedeck_core::{KeyValueStore, PersistenceStatus, WishlistStore};
use moviedeck_models::{MovieId, MovieRecord};
use moviedeck_sources::CatalogSource;
use serde_json::json;
use tracing::info;

pub async fn run_wishlist(cmd: WishlistCommands, context: &AppContext, output: &Output) -> Result<()> {
    let mut wishlist = context.open_wishlist()?;

    match cmd {
        WishlistCommands::List => {
            let movies = wishlist.movies();
            output.emit(&movies, || render::wishlist(movies));
        }
        WishlistCommands::Add { id } => add(&mut wishlist, id, context, output).await?,
        WishlistCommands::Remove { id } => {
            let title = title_of(&wishlist, id);
            if wishlist.remove(id) {
                info!(movie_id = id, "Removed movie from wishlist");
                output.success(format!("Removed {} from your wishlist", title));
            } else {
                output.info(format!("Movie {} is not in your wishlist", id));
            }
        }
        WishlistCommands::Toggle { id } => {
            let movie = match wishlist.get(id).cloned() {
                Some(movie) => movie,
                None => fetch_movie(id, context, output).await?,
            };
            let title = movie.title.clone();
            if wishlist.toggle(movie) {
                output.success(format!("Added {} to your wishlist", title));
            } else {
                output.success(format!("Removed {} from your wishlist", title));
            }
        }
        WishlistCommands::Clear { yes } => {
            if wishlist.is_empty() {
                // rewrite anyway so an unreadable stored value is replaced
                wishlist.clear();
                output.info("Your wishlist is already empty");
                report_persistence(&wishlist, output);
                return Ok(());
            }
            if !yes && output.is_human() && is_interactive() {
                let prompt = format!("Remove all {} movies from your wishlist?", wishlist.count());
                if !prompts::prompt_yes_no(&prompt, Some(false))? {
                    output.info("Cancelled");
                    return Ok(());
                }
            }
            let removed = wishlist.count();
            wishlist.clear();
            info!(removed, "Cleared wishlist");
            output.success(format!("Removed {} movie(s) from your wishlist", removed));
        }
        WishlistCommands::Count => {
            let count = wishlist.count();
            output.emit(&json!({ "count": count }), || count.to_string());
        }
        WishlistCommands::Contains { id } => {
            let in_wishlist = wishlist.contains(id);
            output.emit(&json!({ "id": id, "in_wishlist": in_wishlist }), || {
                if in_wishlist { "yes".to_string() } else { "no".to_string() }
            });
        }
    }

    report_persistence(&wishlist, output);
    Ok(())
}

async fn add<S: KeyValueStore>(
    wishlist: &mut WishlistStore<S>,
    id: MovieId,
    context: &AppContext,
    output: &Output,
) -> Result<()> {
    if let Some(existing) = wishlist.get(id) {
        output.info(format!("{} is already in your wishlist", existing.title));
        return Ok(());
    }

    let movie = fetch_movie(id, context, output).await?;
    let title = movie.title.clone();
    if wishlist.add(movie) {
        info!(movie_id = id, "Added movie to wishlist");
        output.success(format!("Added {} to your wishlist", title));
    }
    Ok(())
}

async fn fetch_movie(id: MovieId, context: &AppContext, output: &Output) -> Result<MovieRecord> {
    let catalog = context.catalog()?;
    match with_spinner(output, "Loading movie details...", catalog.movie_details(id)).await {
        Ok(movie) => Ok(movie),
        Err(e) if e.is_not_found() => Err(color_eyre::eyre::eyre!("Movie {} not found", id)),
        Err(e) => Err(explain_catalog_error(e)),
    }
}

fn title_of<S: KeyValueStore>(wishlist: &WishlistStore<S>, id: MovieId) -> String {
    wishlist
        .get(id)
        .map(|m| m.title.clone())
        .unwrap_or_else(|| format!("movie {}", id))
}

/// Changes stay in effect for this run even when they could not be saved;
/// tell the user so they are not surprised next time.
fn report_persistence<S: KeyValueStore>(wishlist: &WishlistStore<S>, output: &Output) {
    if let PersistenceStatus::Degraded(reason) = wishlist.persistence_status() {
        output.warn(format!("Wishlist changes could not be saved: {}", reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use moviedeck_config::PathManager;
    use moviedeck_core::FileKeyValueStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clear_overwrites_unreadable_wishlist() {
        let dir = TempDir::new().unwrap();
        let context = AppContext::from_paths(PathManager::from_base(dir.path())).unwrap();
        context.paths.ensure_directories().unwrap();
        let storage = FileKeyValueStore::new(context.paths.storage_file());
        storage.set("wishlist", "{{corrupt").unwrap();

        let output = Output::new(OutputFormat::Human, true);
        run_wishlist(WishlistCommands::Clear { yes: false }, &context, &output)
            .await
            .unwrap();

        assert_eq!(storage.get("wishlist").unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_clear_removes_every_movie() {
        let dir = TempDir::new().unwrap();
        let context = AppContext::from_paths(PathManager::from_base(dir.path())).unwrap();
        let mut wishlist = context.open_wishlist().unwrap();
        wishlist.add(MovieRecord::new(603, "The Matrix"));
        wishlist.add(MovieRecord::new(604, "The Matrix Reloaded"));

        let output = Output::new(OutputFormat::Json, true);
        run_wishlist(WishlistCommands::Clear { yes: true }, &context, &output)
            .await
            .unwrap();

        assert!(context.open_wishlist().unwrap().is_empty());
    }
}
