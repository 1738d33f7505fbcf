//! aniki - Kitsu.app anime and manga lookup CLI.

/// Per-call failure capture.
mod capture;
/// Application configuration (TOML).
mod config;
/// Summary tables and JSON output.
mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::capture::Capture;
use crate::config::{AppConfig, KitsuConfig, resolve_config_path};
use aniki_api::kitsu::{
    AgeRating, AnimeApi, AnimeParams, Category, KitsuClient, MangaApi, MangaParams, RatingRange,
    ResourceId, Season, Streamer, YearRange,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Print the raw JSON:API document to stdout instead of a summary.
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query anime and episodes.
    Anime(AnimeCommand),
    /// Query manga and chapters.
    Manga(MangaCommand),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `anime` subcommand.
#[derive(clap::Args)]
struct AnimeCommand {
    /// Anime subcommand to run.
    #[command(subcommand)]
    command: AnimeSubcommands,
}

/// Available anime subcommands.
#[derive(Subcommand)]
enum AnimeSubcommands {
    /// Search anime by text.
    Search(AnimeSearchArgs),
    /// List anime, optionally filtered.
    List(AnimeFilterArgs),
    /// Show one anime by ID.
    Show(IdArgs),
    /// Show one episode by ID.
    Episode(IdArgs),
}

/// Arguments for the `manga` subcommand.
#[derive(clap::Args)]
struct MangaCommand {
    /// Manga subcommand to run.
    #[command(subcommand)]
    command: MangaSubcommands,
}

/// Available manga subcommands.
#[derive(Subcommand)]
enum MangaSubcommands {
    /// Search manga by text.
    Search(MangaSearchArgs),
    /// List manga, optionally filtered.
    List(MangaFilterArgs),
    /// Show one manga by ID.
    Show(IdArgs),
    /// Show one chapter by ID.
    Chapter(IdArgs),
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default values (kept if it already exists).
    Init,
}

/// Lookup by resource ID.
#[derive(clap::Args)]
struct IdArgs {
    /// Kitsu resource ID (e.g. "40052").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for `anime search`.
#[derive(clap::Args)]
struct AnimeSearchArgs {
    /// Search text (e.g. "Oshi no Ko").
    #[arg(long, required = true)]
    query: String,

    /// Filters.
    #[command(flatten)]
    filters: AnimeFilterArgs,
}

/// Anime filters shared by `search` and `list`.
#[derive(clap::Args)]
struct AnimeFilterArgs {
    /// Pagination offset (default: 0).
    #[arg(long)]
    offset: Option<u32>,
    /// Page size (default: config `per_page`, then 10).
    #[arg(long)]
    per_page: Option<u32>,
    /// Season: winter, spring, summer, fall.
    #[arg(long)]
    season: Option<Season>,
    /// Year or range: "2023", "2020..", "2018..2023".
    #[arg(long)]
    year: Option<YearRange>,
    /// Average rating range in percent: "80..", "70..90".
    #[arg(long)]
    average_rating: Option<RatingRange>,
    /// Comma-separated age ratings (e.g. "G,PG").
    #[arg(long, value_delimiter = ',')]
    age_rating: Vec<AgeRating>,
    /// Comma-separated streaming platforms (e.g. "Crunchyroll,Netflix").
    #[arg(long, value_delimiter = ',')]
    streamers: Vec<Streamer>,
    /// Comma-separated categories (e.g. "comedy,slice_of_life").
    #[arg(long, value_delimiter = ',')]
    categories: Vec<Category>,
}

impl AnimeFilterArgs {
    /// Builds request parameters, falling back to `default_per_page`.
    fn to_params(&self, query: Option<&str>, default_per_page: Option<u32>) -> AnimeParams {
        AnimeParams {
            query: query.map(String::from),
            offset: self.offset,
            per_page: self.per_page.or(default_per_page),
            average_rating: self.average_rating,
            season: self.season,
            age_ratings: self.age_rating.clone(),
            year: self.year,
            streamers: self.streamers.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// Arguments for `manga search`.
#[derive(clap::Args)]
struct MangaSearchArgs {
    /// Search text (e.g. "Berserk").
    #[arg(long, required = true)]
    query: String,

    /// Filters.
    #[command(flatten)]
    filters: MangaFilterArgs,
}

/// Manga filters shared by `search` and `list`.
#[derive(clap::Args)]
struct MangaFilterArgs {
    /// Pagination offset (default: 0).
    #[arg(long)]
    offset: Option<u32>,
    /// Page size (default: config `per_page`, then 10).
    #[arg(long)]
    per_page: Option<u32>,
    /// Season: winter, spring, summer, fall.
    #[arg(long)]
    season: Option<Season>,
    /// Year or range: "2023", "2020..", "2018..2023".
    #[arg(long)]
    year: Option<YearRange>,
    /// Average rating range in percent: "80..", "70..90".
    #[arg(long)]
    average_rating: Option<RatingRange>,
    /// Comma-separated categories (e.g. "horror,thriller").
    #[arg(long, value_delimiter = ',')]
    categories: Vec<Category>,
}

impl MangaFilterArgs {
    /// Builds request parameters, falling back to `default_per_page`.
    fn to_params(&self, query: Option<&str>, default_per_page: Option<u32>) -> MangaParams {
        MangaParams {
            query: query.map(String::from),
            offset: self.offset,
            per_page: self.per_page.or(default_per_page),
            average_rating: self.average_rating,
            season: self.season,
            year: self.year,
            categories: self.categories.clone(),
        }
    }
}

/// Loads the `[kitsu]` config table.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be parsed.
fn load_kitsu_config(dir: Option<&Path>) -> Result<KitsuConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok(config.kitsu)
}

/// Builds a `KitsuClient` from config.
///
/// # Errors
///
/// Returns an error if `base_url` is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_kitsu_client(config: &KitsuConfig) -> Result<KitsuClient> {
    let mut builder = KitsuClient::builder();
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }
    if let Some(ua) = config.user_agent.as_deref() {
        builder = builder.user_agent(ua);
    }
    let client = builder.build().context("failed to build Kitsu client")?;
    tracing::debug!(base_url = %client.base_url(), "Kitsu client ready");
    Ok(client)
}

/// Runs an `anime` subcommand.
///
/// # Errors
///
/// Returns an error if config loading fails or the Kitsu call reports a failure.
#[instrument(skip_all)]
async fn run_anime(cmd: AnimeSubcommands, dir: Option<&Path>, json: bool) -> Result<()> {
    let config = load_kitsu_config(dir)?;
    let anime = build_kitsu_client(&config)?.anime();
    let capture = Capture::new();

    match cmd {
        AnimeSubcommands::Search(args) => {
            let params = args
                .filters
                .to_params(Some(args.query.as_str()), config.per_page);
            let found = anime.find(&params, Some(capture.handler())).await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_anime_list(&doc.data, doc.meta.and_then(|m| m.count));
        }
        AnimeSubcommands::List(filters) => {
            let params = filters.to_params(None, config.per_page);
            let found = anime.list(&params, Some(capture.handler())).await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_anime_list(&doc.data, doc.meta.and_then(|m| m.count));
        }
        AnimeSubcommands::Show(args) => {
            let found = anime
                .find_by_id(ResourceId::from(args.id), Some(capture.handler()))
                .await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_anime(&doc.data);
        }
        AnimeSubcommands::Episode(args) => {
            let found = anime
                .episode(ResourceId::from(args.id), Some(capture.handler()))
                .await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_episode(&doc.data);
        }
    }
    Ok(())
}

/// Runs a `manga` subcommand.
///
/// # Errors
///
/// Returns an error if config loading fails or the Kitsu call reports a failure.
#[instrument(skip_all)]
async fn run_manga(cmd: MangaSubcommands, dir: Option<&Path>, json: bool) -> Result<()> {
    let config = load_kitsu_config(dir)?;
    let manga = build_kitsu_client(&config)?.manga();
    let capture = Capture::new();

    match cmd {
        MangaSubcommands::Search(args) => {
            let params = args
                .filters
                .to_params(Some(args.query.as_str()), config.per_page);
            let found = manga.find(&params, Some(capture.handler())).await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_manga_list(&doc.data, doc.meta.and_then(|m| m.count));
        }
        MangaSubcommands::List(filters) => {
            let params = filters.to_params(None, config.per_page);
            let found = manga.list(&params, Some(capture.handler())).await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_manga_list(&doc.data, doc.meta.and_then(|m| m.count));
        }
        MangaSubcommands::Show(args) => {
            let found = manga
                .find_by_id(ResourceId::from(args.id), Some(capture.handler()))
                .await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_manga(&doc.data);
        }
        MangaSubcommands::Chapter(args) => {
            let found = manga
                .chapters(ResourceId::from(args.id), Some(capture.handler()))
                .await;
            let doc = capture.finish(found).await?;
            if json {
                return output::print_json(&doc);
            }
            output::log_chapter(&doc.data);
        }
    }
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be written.
#[instrument(skip_all)]
fn run_config_init(dir: Option<&Path>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() {
        tracing::info!("Config already exists: {}", config_path.display());
        return Ok(());
    }
    AppConfig::template()
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    match cli.command {
        Commands::Anime(cmd) => run_anime(cmd.command, dir, cli.json).await,
        Commands::Manga(cmd) => run_manga(cmd.command, dir, cli.json).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init => run_config_init(dir),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use aniki_api::kitsu::{EncodeQuery, FilterKey};
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        // Arrange & Act & Assert
        Cli::command().debug_assert();
    }

    #[test]
    fn test_anime_filters_to_params() {
        // Arrange
        let cli = Cli::try_parse_from([
            "aniki",
            "anime",
            "search",
            "--query",
            "Frieren",
            "--season",
            "fall",
            "--year",
            "2023",
            "--age-rating",
            "G,PG",
            "--streamers",
            "crunchyroll",
            "--categories",
            "fantasy,adventure",
        ])
        .unwrap();
        let Commands::Anime(AnimeCommand {
            command: AnimeSubcommands::Search(args),
        }) = cli.command
        else {
            panic!("expected anime search");
        };

        // Act
        let encoded = args.filters.to_params(Some(args.query.as_str()), Some(25)).encode();

        // Assert
        assert_eq!(encoded.get(FilterKey::Text), Some("Frieren"));
        assert_eq!(encoded.get(FilterKey::Limit), Some("25"));
        assert_eq!(encoded.get(FilterKey::Season), Some("fall"));
        assert_eq!(encoded.get(FilterKey::AgeRating), Some("G,PG"));
        assert_eq!(encoded.get(FilterKey::Streamers), Some("Crunchyroll"));
        assert_eq!(encoded.get(FilterKey::Categories), Some("fantasy,adventure"));
    }

    #[test]
    fn test_per_page_flag_overrides_config() {
        // Arrange
        let cli = Cli::try_parse_from(["aniki", "manga", "list", "--per-page", "5"]).unwrap();
        let Commands::Manga(MangaCommand {
            command: MangaSubcommands::List(filters),
        }) = cli.command
        else {
            panic!("expected manga list");
        };

        // Act
        let params = filters.to_params(None, Some(25));

        // Assert
        assert_eq!(params.per_page, Some(5));
        assert!(params.query.is_none());
    }

    #[test]
    fn test_invalid_season_is_rejected() {
        // Arrange & Act
        let result = Cli::try_parse_from(["aniki", "anime", "list", "--season", "autumn"]);

        // Assert
        assert!(result.is_err());
    }
}
