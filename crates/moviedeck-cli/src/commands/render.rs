//! Human-readable rendering of catalog data. Every function returns the text
//! to print so `Output::emit` decides whether it is shown at all.

use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use moviedeck_core::{CategoryView, HomeFeed, MovieDetailView, Suggestions};
use moviedeck_models::format::{badge_count, format_currency, format_long_date, format_rating, format_runtime, truncate_text};
use moviedeck_models::{GenreList, MovieId, MovieRecord, Page};
use moviedeck_sources::ImageUrls;
use owo_colors::OwoColorize;
use std::collections::HashSet;

const OVERVIEW_CHARS: usize = 160;
const CAST_LIMIT: usize = 5;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn heading(title: &str) -> String {
    format!("{}", title.bright_cyan().bold())
}

/// One row per movie; `saved` marks wishlist members with a heart
pub fn movie_table(movies: &[MovieRecord], saved: &HashSet<MovieId>) -> String {
    if movies.is_empty() {
        return format!("{}", "No movies found".bright_black());
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new(""),
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
    ]);

    for movie in movies {
        let marker = if saved.contains(&movie.id) { "♥" } else { "" };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Red),
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(movie.release_year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(format!("★ {}", format_rating(movie.vote_average))),
        ]);
    }

    table.to_string()
}

pub fn movie_page(title: &str, page: &Page<MovieRecord>, saved: &HashSet<MovieId>) -> String {
    let mut out = format!("\n{}\n", heading(title));
    out.push_str(&movie_table(&page.results, saved));
    if page.total_pages > 0 {
        out.push_str(&format!(
            "\n{}",
            format!("Page {} of {} ({} results)", page.page, page.total_pages, page.total_results).bright_black()
        ));
        if page.has_next() {
            out.push_str(&format!("{}", "  use --page to see more".bright_black()));
        }
    }
    out
}

pub fn home_feed(feed: &HomeFeed, images: &ImageUrls, saved: &HashSet<MovieId>) -> String {
    let mut out = String::new();

    if let Some(hero) = &feed.hero {
        out.push_str(&format!("\n{} {}\n", "Featured:".bright_white().bold(), hero.title.bold()));
        if !hero.overview.is_empty() {
            out.push_str(&format!("{}\n", truncate_text(&hero.overview, OVERVIEW_CHARS)));
        }
        if let Some(url) = images.backdrop(hero.backdrop_path.as_deref()) {
            out.push_str(&format!("{}\n", url.bright_black()));
        }
    }

    let sections = [
        ("Trending This Week", &feed.trending),
        ("Popular", &feed.popular),
        ("Top Rated", &feed.top_rated),
        ("Now Playing", &feed.now_playing),
    ];
    for (title, movies) in sections {
        out.push_str(&format!("\n{}\n", heading(title)));
        out.push_str(&movie_table(movies, saved));
        out.push('\n');
    }

    out
}

pub fn movie_detail(view: &MovieDetailView, images: &ImageUrls, saved: &HashSet<MovieId>) -> String {
    let movie = &view.movie;
    let mut out = String::new();

    let in_wishlist = saved.contains(&movie.id);
    out.push_str(&format!("\n{}", movie.title.bright_white().bold()));
    if let Some(year) = movie.release_year() {
        out.push_str(&format!(" ({})", year));
    }
    if in_wishlist {
        out.push_str(&format!(" {}", "♥ in wishlist".red()));
    }
    out.push('\n');

    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("{}\n", tagline.italic()));
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("★ {} ({} votes)", format_rating(movie.vote_average), movie.vote_count)),
    ]);
    if let Some(date) = movie.release_date.as_deref().and_then(format_long_date) {
        table.add_row(vec![Cell::new("Release Date"), Cell::new(date)]);
    }
    if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
        table.add_row(vec![Cell::new("Runtime"), Cell::new(format_runtime(runtime))]);
    }
    let genres = movie.genre_names();
    if !genres.is_empty() {
        table.add_row(vec![Cell::new("Genres"), Cell::new(genres.join(", "))]);
    }
    if let Some(status) = &movie.status {
        table.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    }
    if let Some(budget) = movie.budget.filter(|b| *b > 0) {
        table.add_row(vec![Cell::new("Budget"), Cell::new(format_currency(budget))]);
    }
    if let Some(revenue) = movie.revenue.filter(|r| *r > 0) {
        table.add_row(vec![Cell::new("Revenue"), Cell::new(format_currency(revenue))]);
    }
    if let Some(url) = images.poster(movie.poster_path.as_deref()) {
        table.add_row(vec![Cell::new("Poster"), Cell::new(url)]);
    }
    if let Some(trailer) = view.trailer.as_ref().and_then(|t| t.watch_url()) {
        table.add_row(vec![Cell::new("Trailer"), Cell::new(trailer)]);
    }
    if let Some(credits) = &view.credits {
        let directors: Vec<&str> = credits.directors().into_iter().map(|d| d.name.as_str()).collect();
        if !directors.is_empty() {
            table.add_row(vec![Cell::new("Director"), Cell::new(directors.join(", "))]);
        }
        let cast: Vec<String> = credits
            .top_cast(CAST_LIMIT)
            .iter()
            .map(|c| match c.character.as_deref().filter(|ch| !ch.is_empty()) {
                Some(character) => format!("{} as {}", c.name, character),
                None => c.name.clone(),
            })
            .collect();
        if !cast.is_empty() {
            table.add_row(vec![Cell::new("Cast"), Cell::new(cast.join("\n"))]);
        }
    }
    out.push_str(&table.to_string());
    out.push('\n');

    if !movie.overview.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", heading("Overview"), movie.overview));
    }

    if !view.similar.is_empty() {
        out.push_str(&format!("\n{}\n", heading("Similar Movies")));
        out.push_str(&movie_table(&view.similar, saved));
    }

    out
}

pub fn category(view: &CategoryView, saved: &HashSet<MovieId>) -> String {
    movie_page(&format!("{} Movies", view.genre_name), &view.page, saved)
}

pub fn genres(list: &GenreList) -> String {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
    ]);
    for genre in &list.genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    table.to_string()
}

pub fn suggestions(batch: &Suggestions) -> String {
    if batch.movies.is_empty() {
        return format!("{} {}", format!("{:?}:", batch.query).bright_black(), "no suggestions".bright_black());
    }

    let mut out = format!("{}", format!("{:?}:", batch.query).bright_black());
    for movie in &batch.movies {
        out.push_str(&format!("\n  {}", movie.title));
        if let Some(year) = movie.release_year() {
            out.push_str(&format!(" ({})", year));
        }
        out.push_str(&format!(" {}", format!("[{}]", movie.id).bright_black()));
    }
    out
}

pub fn wishlist(movies: &[MovieRecord]) -> String {
    let mut out = format!(
        "\n{} {}\n",
        heading("My Wishlist"),
        format!("({})", badge_count(movies.len())).bright_black()
    );

    if movies.is_empty() {
        out.push_str("Your wishlist is empty. Add movies with 'moviedeck wishlist add <id>'.");
        return out;
    }

    let noun = if movies.len() == 1 { "movie" } else { "movies" };
    out.push_str(&format!("Your favorite movies collection ({} {})\n", movies.len(), noun));
    let saved: HashSet<MovieId> = movies.iter().map(|m| m.id).collect();
    out.push_str(&movie_table(movies, &saved));
    out
}
