//! watchme - browse TMDB movie lists, search and details from the terminal.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;
/// Terminal UI components.
mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use watchme_api::image::ImageResolver;
use watchme_api::tmdb::{MovieCategory, MovieDetails, MovieSummary, TmdbClient};
use watchme_core::display::{
    DateStyle, DisplayLocale, format_money, format_rating, format_release_date, format_runtime,
};
use watchme_core::{DetailFetcher, ListFetcher, ListView, SearchFetcher, watch_url};

use crate::config::{API_KEY_ENV, AppConfig, TmdbConfig, resolve_config_path};
use crate::logging::LogTarget;
use crate::tui::state::BrowserState;

/// Log file written by `browse`, next to the config file.
const LOG_FILE_NAME: &str = "watchme.log";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the first page of a movie category.
    List(ListArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Print details, trailer and cast of a movie.
    Details(DetailsArgs),
    /// Browse categories, search and details in a terminal UI.
    Browse(BrowseArgs),
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Category: popular, top_rated, upcoming or now_playing.
    #[arg(long, default_value = "popular")]
    category: MovieCategory,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Matrix"). A blank query makes no request.
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID (e.g. 603).
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Initial category. Defaults to the one used last.
    #[arg(long)]
    category: Option<MovieCategory>,
}

/// Loads the config file and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be parsed.
fn load_config(config_path: &Path) -> Result<AppConfig> {
    let config = AppConfig::load(config_path).context("failed to load config")?;
    Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
}

/// Builds a `TmdbClient` from the `[tmdb]` config section.
///
/// # Errors
///
/// Returns an error if no credential is configured, `base_url` is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig, config_path: &Path) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .language(config.language());

    match (&config.api_token, &config.api_key) {
        (Some(token), _) => builder = builder.api_token(token),
        (None, Some(key)) => builder = builder.api_key(key),
        (None, None) => bail!(
            "TMDB API key is required: set {API_KEY_ENV} or tmdb.api_key in {}",
            config_path.display()
        ),
    }
    if let Some(base_url) = config.base_url()? {
        builder = builder.base_url(base_url);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().context("failed to build TMDB client")
}

/// Prints a movie table through `tracing::info!`.
fn print_movies(movies: &[MovieSummary], locale: DisplayLocale) {
    tracing::info!("Total results: {}", movies.len());
    tracing::info!("ID\tRating\tRelease\t\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            format_rating(movie.vote_average),
            format_release_date(&movie.release_date, DateStyle::Short, locale)
                .unwrap_or_else(|| String::from("-")),
            movie.title,
        );
    }
}

/// Turns a list view into output or a command error.
fn report_view(view: ListView<'_>, locale: DisplayLocale) -> Result<()> {
    match view {
        ListView::Movies(movies) => print_movies(movies, locale),
        ListView::Empty => tracing::info!("No movies found"),
        ListView::Error(err) => match &err.detail {
            Some(detail) => bail!("{err}: {detail}"),
            None => bail!("{err}"),
        },
        ListView::Loading => bail!("request did not complete"),
    }
    Ok(())
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let client = build_tmdb_client(&config.tmdb, config_path)?;
    let locale = DisplayLocale::from_language(client.language());

    let mut fetcher = ListFetcher::new();
    fetcher.load(&client, args.category).await;

    tracing::info!("{}", args.category.title());
    report_view(fetcher.view(), locale)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config_path: &Path) -> Result<()> {
    let mut fetcher = SearchFetcher::new();
    let Some(request) = fetcher.begin(&args.query) else {
        tracing::info!("Empty query, nothing to search");
        return Ok(());
    };

    let config = load_config(config_path)?;
    let client = build_tmdb_client(&config.tmdb, config_path)?;
    let locale = DisplayLocale::from_language(client.language());

    let response = request.run(&client).await;
    fetcher.apply(response);

    report_view(fetcher.view(), locale)
}

/// Prints the metadata block of the `details` output.
fn print_movie_details(details: &MovieDetails, images: &ImageResolver, locale: DisplayLocale) {
    let summary = &details.summary;

    tracing::info!("{} ({})", summary.title, summary.id);
    if !summary.original_title.is_empty() && summary.original_title != summary.title {
        tracing::info!("Original title: {}", summary.original_title);
    }
    if let Some(date) = format_release_date(&summary.release_date, DateStyle::Long, locale) {
        tracing::info!("Release: {date}");
    }
    if let Some(runtime) = format_runtime(details.runtime) {
        tracing::info!("Runtime: {runtime}");
    }
    tracing::info!("Rating: {} / 5", format_rating(summary.vote_average));
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        tracing::info!("Genres: {}", genres.join(", "));
    }
    if let Some(budget) = format_money(details.budget, locale) {
        tracing::info!("Budget: {budget}");
    }
    if let Some(revenue) = format_money(details.revenue, locale) {
        tracing::info!("Revenue: {revenue}");
    }
    match images.resolve(summary.poster_path.as_deref()).url() {
        Some(url) => tracing::info!("Poster: {url}"),
        None => tracing::info!("Poster: -"),
    }
    if !summary.overview.is_empty() {
        tracing::info!("Overview: {}", summary.overview);
    }
}

/// Runs the `details` subcommand.
///
/// Each of the three requests fails on its own: whatever loaded is printed.
///
/// # Errors
///
/// Returns an error if the client fails to build, or if metadata, videos
/// and cast all came back empty.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let client = build_tmdb_client(&config.tmdb, config_path)?;
    let locale = DisplayLocale::from_language(client.language());
    let images = ImageResolver::new(config.tmdb.image_base_url());

    let mut fetcher = DetailFetcher::new();
    fetcher.load(&client, args.id).await;

    let details = fetcher.details();
    if details.is_none() && fetcher.videos().is_empty() && fetcher.cast().is_empty() {
        bail!("failed to fetch details for movie {}", args.id);
    }

    match details {
        Some(details) => print_movie_details(details, &images, locale),
        None => tracing::info!("Movie {}: details unavailable", args.id),
    }

    match fetcher.trailer() {
        Some(trailer) => tracing::info!("Trailer: {}", watch_url(&trailer.key)),
        None => tracing::info!("Trailer: -"),
    }

    tracing::info!("Cast ({}):", fetcher.cast().len());
    for member in fetcher.cast() {
        tracing::info!("  {}\t{}", member.name, member.character);
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// Saves the last active category to the config file on exit.
///
/// # Errors
///
/// Returns an error if the client fails to build, the TUI fails, or the
/// config cannot be saved.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let client = build_tmdb_client(&config.tmdb, config_path)?;
    let locale = DisplayLocale::from_language(client.language());
    let images = ImageResolver::new(config.tmdb.image_base_url());

    let category = args
        .category
        .or(config.browse.default_category)
        .unwrap_or_default();
    tracing::info!(%category, "starting browser");

    let state = BrowserState::new(locale, images);
    let last = tui::run_browser(Arc::new(client), state, category)
        .await
        .context("movie browser TUI failed")?;

    // Reload without env overrides so credentials from the environment are not persisted.
    let mut saved = AppConfig::load(config_path).context("failed to load config")?;
    if saved.browse.default_category != Some(last) {
        saved.browse.default_category = Some(last);
        saved.save(config_path).context("failed to save config")?;
    }
    tracing::info!(category = %last, "browser closed");

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;

    match &cli.command {
        Commands::Browse(_) => {
            let log_path = config_path.with_file_name(LOG_FILE_NAME);
            logging::init(LogTarget::File(&log_path))?;
        }
        _ => logging::init(LogTarget::Stdout)?,
    }

    match cli.command {
        Commands::List(args) => run_list(&args, &config_path).await,
        Commands::Search(args) => run_search(&args, &config_path).await,
        Commands::Details(args) => run_details(&args, &config_path).await,
        Commands::Browse(args) => run_browse(&args, &config_path).await,
    }
}
