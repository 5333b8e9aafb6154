use clap::{Args, Subcommand};
use anyhow::Result;

use crate::services::SimpleServices;

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    command: CacheCommands,
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache statistics
    Stats,
}

pub async fn execute(args: CacheArgs, services: &SimpleServices) -> Result<()> {
    match args.command {
        CacheCommands::Stats => {
            let stats = services.cache_store().stats().await?;
            let config = services.config();

            println!("Cache Statistics ({})", config.database_path.display());
            println!("  Song entries: {}", stats.song_entries);
            println!("    with lyrics: {}", stats.songs_with_lyrics);
            println!("    with translation: {}", stats.songs_with_translation);
            println!("  Text translations: {}", stats.text_entries);

            match (stats.oldest_entry, stats.newest_entry) {
                (Some(oldest), Some(newest)) => {
                    println!("  Oldest entry: {}", oldest.to_rfc3339());
                    println!("  Newest entry: {}", newest.to_rfc3339());
                }
                _ => println!("  Cache is empty"),
            }

            if config.enforce_cache_expiry {
                println!("  Entries expire after {} days", config.cache_expiry_days);
            } else {
                println!("  Expiry not enforced");
            }
        }
    }

    Ok(())
}
