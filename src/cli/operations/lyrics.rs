use clap::Args;
use anyhow::Result;

use crate::services::SimpleServices;

#[derive(Args)]
pub struct LyricsArgs {
    /// Artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Song title
    #[arg(value_name = "TITLE")]
    title: String,

    /// Target language for the translation (defaults to config)
    #[arg(short, long)]
    lang: Option<String>,
}

pub async fn execute(args: LyricsArgs, services: &SimpleServices) -> Result<()> {
    let result = services
        .orchestrator()
        .fetch_song(&args.artist, &args.title, args.lang.as_deref())
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
