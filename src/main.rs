use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod services;
mod signal_handler;
mod utils;
mod web;

use config::Config;
use error::{BridgeError, Result};
use services::SimpleServices;

#[derive(Parser)]
#[command(name = "lyrics-bridge")]
#[command(about = "HTTP bridge serving song lyrics and translations with a local cache")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(cli::serve::ServeArgs),

    /// Search the lyrics provider for track candidates
    Search(cli::search::SearchArgs),

    /// Fetch lyrics and a translation for one song
    Lyrics(cli::lyrics::LyricsArgs),

    /// Translate a piece of text
    Translate(cli::translate::TranslateArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),

    /// Inspect the cache
    Cache(cli::cache::CacheArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose).map_err(BridgeError::Internal)?;

    let config = Config::load(cli.config.as_deref())?;

    // Config inspection works without opening the cache
    let result = match cli.command {
        Commands::Config(args) => cli::config::execute(args, &config).await,
        Commands::Serve(args) => cli::serve::execute(args, &SimpleServices::new(config)?).await,
        Commands::Search(args) => cli::search::execute(args, &SimpleServices::new(config)?).await,
        Commands::Lyrics(args) => cli::lyrics::execute(args, &SimpleServices::new(config)?).await,
        Commands::Translate(args) => cli::translate::execute(args, &SimpleServices::new(config)?).await,
        Commands::Cache(args) => cli::cache::execute(args, &SimpleServices::new(config)?).await,
    };

    result.map_err(BridgeError::Internal)
}
