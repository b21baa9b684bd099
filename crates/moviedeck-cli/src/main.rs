use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{browse, clear, config, context::AppContext, wishlist};
use moviedeck_models::{Category, MovieId, TimeWindow};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviedeck")]
#[command(about = "moviedeck - Discover movies and keep a wishlist of the ones you want to watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trending, popular, top-rated and now-playing highlights
    Home,

    /// One of the curated movie lists
    List {
        #[arg(value_enum)]
        list: ListKind,

        /// Page number (starts at 1)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Trending movies
    Trending {
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,
    },

    /// Search movies by title
    Search {
        query: String,

        /// Page number (starts at 1)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Title suggestions for a partial query
    #[command(long_about = "Show title suggestions for a partial query. With --stdin, every line read from standard input is treated as an edit of the query; lookups are debounced so only the latest query in a burst of edits is searched.")]
    Suggest {
        query: Option<String>,

        /// Read successive queries from standard input
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "query")]
        stdin: bool,
    },

    /// List the genre taxonomy
    Genres,

    /// Movies in a genre
    Category {
        genre_id: u32,

        /// Page number (starts at 1)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Details for one movie, with similar titles
    Show {
        id: MovieId,

        /// Include top-billed cast and directors
        #[arg(long, action = ArgAction::SetTrue)]
        credits: bool,

        /// Include the trailer link
        #[arg(long, action = ArgAction::SetTrue)]
        videos: bool,
    },

    /// Manage your wishlist (lists it when no subcommand is given)
    Wishlist {
        #[command(subcommand)]
        cmd: Option<WishlistCommands>,
    },

    /// Show or change configuration (shows it when no subcommand is given)
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Delete local data
    #[command(long_about = "Delete local data. Use --storage to delete the local storage file (including the wishlist), --credentials to delete the stored API key, --logs to delete log files, or --all for everything.")]
    Clear {
        /// Delete storage, credentials and logs
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["storage", "credentials", "logs"])]
        all: bool,

        /// Delete the local storage file (wishlist)
        #[arg(long, action = ArgAction::SetTrue)]
        storage: bool,

        /// Delete stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Delete log files
        #[arg(long, action = ArgAction::SetTrue)]
        logs: bool,
    },
}

#[derive(Subcommand)]
pub enum WishlistCommands {
    /// List wishlist movies in the order they were added
    List,

    /// Add a movie by id (fetches its details)
    Add { id: MovieId },

    /// Remove a movie by id
    Remove { id: MovieId },

    /// Add the movie if missing, remove it otherwise
    Toggle { id: MovieId },

    /// Remove every movie
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Number of movies in the wishlist
    Count,

    /// Whether a movie is in the wishlist
    Contains { id: MovieId },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store or remove the TMDB API key
    #[command(long_about = "Store the TMDB API key in the credentials file, or remove it with --clear. The TMDB_API_KEY environment variable, when set, takes precedence over the stored key.")]
    ApiKey {
        /// API key (prompted for when omitted)
        #[arg(long)]
        key: Option<String>,

        /// Remove the stored API key
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "key")]
        clear: bool,
    },

    /// Change settings
    Set {
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        image_base_url: Option<String>,

        /// Response language, e.g. en-US (empty to unset)
        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        timeout_secs: Option<u64>,

        #[arg(long)]
        home_section_limit: Option<usize>,

        #[arg(long)]
        similar_limit: Option<usize>,

        #[arg(long)]
        suggestion_limit: Option<usize>,

        #[arg(long)]
        suggestion_debounce_ms: Option<u64>,

        /// Log to this file instead of stderr (empty to unset)
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Print the files moviedeck reads and writes
    Paths,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListKind {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl From<ListKind> for Category {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Popular => Category::Popular,
            ListKind::TopRated => Category::TopRated,
            ListKind::NowPlaying => Category::NowPlaying,
            ListKind::Upcoming => Category::Upcoming,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WindowArg {
    Day,
    Week,
}

impl From<WindowArg> for TimeWindow {
    fn from(window: WindowArg) -> Self {
        match window {
            WindowArg::Day => TimeWindow::Day,
            WindowArg::Week => TimeWindow::Week,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let context = AppContext::load()?;

    logging::init_logging(cli.verbose, cli.quiet, context.log_file())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Home => browse::run_home(&context, &output).await,
        Commands::List { list, page } => browse::run_list(&context, list.into(), page, &output).await,
        Commands::Trending { window } => browse::run_trending(&context, window.into(), &output).await,
        Commands::Search { query, page } => browse::run_search(&context, &query, page, &output).await,
        Commands::Suggest { query, stdin } => browse::run_suggest(&context, query, stdin, &output).await,
        Commands::Genres => browse::run_genres(&context, &output).await,
        Commands::Category { genre_id, page } => browse::run_category(&context, genre_id, page, &output).await,
        Commands::Show { id, credits, videos } => browse::run_show(&context, id, credits, videos, &output).await,
        Commands::Wishlist { cmd } => {
            let cmd = cmd.unwrap_or(WishlistCommands::List);
            wishlist::run_wishlist(cmd, &context, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &context, &output)
        }
        Commands::Clear { all, storage, credentials, logs } => clear::run_clear(all, storage, credentials, logs, &context, &output),
    }
}
