use animeta_config::{Config, PathManager};
use animeta_core::Catalog;
use animeta_models::{AiringStatus, BrowseQuery, SortDirection, SortKey};
use clap::{ArgAction, Parser, Subcommand};
use tokio_util::sync::CancellationToken;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "animeta")]
#[command(about = "Anime discovery across multiple catalogs with graceful fallback")]
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
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Featured pick, trending, new releases and the genre catalog in one view
    Home,
    /// The most popular anime right now
    Trending {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Shows that started airing recently
    NewReleases {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Search by title, synopsis, or genre
    Search {
        query: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Page through the full catalog with sorting and filters
    Browse {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Records per page (defaults to the configured page limit)
        #[arg(long)]
        limit: Option<u32>,

        /// Sort key: score, popularity, start_date, title, rank
        #[arg(long, default_value = "score")]
        sort: SortKey,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        direction: SortDirection,

        /// Canonical genre id (see `animeta genres`)
        #[arg(long)]
        genre: Option<u32>,

        /// Airing status: airing, finished, upcoming
        #[arg(long)]
        status: Option<AiringStatus>,
    },
    /// List the genre catalog
    Genres,
    /// Full details for one anime id
    Show { id: String },
    /// Configuration management
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration (secrets masked)
    Show,
    /// Write a default config file
    Init,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    tracing::debug!(providers = ?config.configured_providers(), "configuration loaded");

    let output = output::Output::new(cli.format, cli.quiet);

    // Ctrl-C aborts the in-flight provider chain instead of killing the
    // process mid-write.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    match cli.command {
        Commands::Home => {
            let catalog = Catalog::from_config(&config);
            commands::home::run(&catalog, &cancel, &output).await
        }
        Commands::Trending { limit } => {
            let catalog = Catalog::from_config(&config);
            commands::trending::run(&catalog, limit, &cancel, &output).await
        }
        Commands::NewReleases { limit } => {
            let catalog = Catalog::from_config(&config);
            commands::new_releases::run(&catalog, limit, &cancel, &output).await
        }
        Commands::Search { query, limit } => {
            let catalog = Catalog::from_config(&config);
            commands::search::run(&catalog, &query, limit, &cancel, &output).await
        }
        Commands::Browse { page, limit, sort, direction, genre, status } => {
            let catalog = Catalog::from_config(&config);
            let query = BrowseQuery {
                page,
                limit: limit.unwrap_or(config.fetch.page_limit).max(1),
                sort,
                direction,
                genre,
                status,
                min_score: None,
                max_score: None,
                season: None,
                year: None,
            };
            commands::browse::run(&catalog, query, &cancel, &output).await
        }
        Commands::Genres => {
            let catalog = Catalog::from_config(&config);
            commands::genres::run(&catalog, &cancel, &output).await
        }
        Commands::Show { id } => {
            let catalog = Catalog::from_config(&config);
            commands::show::run(&catalog, &id, &cancel, &output).await
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => commands::config::run_show(&config, &output),
            ConfigCommands::Init => commands::config::run_init(&paths, &output),
            ConfigCommands::Path => commands::config::run_path(&paths, &output),
        },
    }
}
