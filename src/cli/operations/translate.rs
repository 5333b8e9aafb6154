use clap::Args;
use anyhow::Result;

use crate::services::SimpleServices;

#[derive(Args)]
pub struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: String,

    /// Target language (defaults to config)
    #[arg(short, long)]
    lang: Option<String>,
}

pub async fn execute(args: TranslateArgs, services: &SimpleServices) -> Result<()> {
    let result = services
        .orchestrator()
        .translate_text(&args.text, args.lang.as_deref())
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
