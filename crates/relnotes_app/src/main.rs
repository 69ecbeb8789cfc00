mod commands;
mod config;
mod effects;
mod logging;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use config::{AppConfig, DEFAULT_CONFIG_PATH};
use logging::LogDestination;

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(about = "Watches the AndroidX release notes feed")]
struct Cli {
    /// Configuration file (RON)
    #[arg(global = true, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the configured feed URL
    #[arg(global = true, long)]
    feed_url: Option<String>,
    /// Overrides the configured state directory
    #[arg(global = true, long)]
    state_dir: Option<PathBuf>,
    #[arg(global = true, long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
    /// Log at debug level
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one poll cycle and notify on a new release
    Check,
    /// Poll on the configured interval until Ctrl-C
    Daemon,
    /// Print one frame of the grouped release notes
    List {
        /// Rows scrolled past the top
        #[arg(long, default_value_t = 0)]
        scroll: i32,
        /// Viewport height; defaults to the configured value
        #[arg(long)]
        rows: Option<u16>,
    },
    /// Print the link of the entry at a list position
    Open { position: usize },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log, level);

    let mut config = AppConfig::load(&cli.config);
    if let Some(feed_url) = cli.feed_url {
        config.feed_url = feed_url;
    }
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = state_dir;
    }

    match cli.command {
        Commands::Check => commands::check(&config).await,
        Commands::Daemon => commands::daemon(&config).await,
        Commands::List { scroll, rows } => {
            commands::list(&config, scroll, rows.unwrap_or(config.viewport_rows)).await
        }
        Commands::Open { position } => commands::open(&config, position).await,
    }
}
