use clap::Args;
use anyhow::Result;
use tracing::info;

use crate::services::SimpleServices;

#[derive(Args)]
pub struct SearchArgs {
    /// Artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Song title
    #[arg(value_name = "TITLE")]
    title: String,

    /// Output format (table, json)
    #[arg(long, default_value = "table")]
    format: String,
}

pub async fn execute(args: SearchArgs, services: &SimpleServices) -> Result<()> {
    info!("Searching for: {} - {}", args.artist, args.title);
    let results = services.orchestrator().search_tracks(&args.artist, &args.title).await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No tracks found");
        return Ok(());
    }

    println!("{:<12} {:<30} {:<30} {}", "TRACK ID", "TITLE", "ARTIST", "ALBUM");
    for track in &results {
        println!(
            "{:<12} {:<30} {:<30} {}",
            track.track_id,
            track.track_name.as_deref().unwrap_or("-"),
            track.artist_name.as_deref().unwrap_or("-"),
            track.album_name.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
