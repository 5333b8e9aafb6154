use clap::{Args, Subcommand};
use anyhow::Result;

use crate::config::env::EnvParser;
use crate::config::Config as AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

fn mask(secret: Option<&str>) -> &'static str {
    match secret {
        Some(value) if !value.trim().is_empty() => "<set>",
        _ => "<not set>",
    }
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  database_path: {}", config.database_path.display());
            println!("  bind_addr: {}", config.bind_addr);
            println!("  port: {}", config.port);
            println!("  default_lang: {}", config.default_lang);
            println!("  cache_expiry_days: {}", config.cache_expiry_days);
            println!("  enforce_cache_expiry: {}", config.enforce_cache_expiry);
            println!("  musixmatch_base_url: {}", config.musixmatch_base_url);
            println!("  musixmatch_api_key: {}", mask(config.musixmatch_api_key.as_deref()));
            println!("  translation_enabled: {}", config.translation_enabled);
            println!("  libretranslate_url: {}", config.libretranslate_url);
            println!("  libretranslate_api_key: {}", mask(config.libretranslate_api_key.as_deref()));
            println!("  request_timeout_secs: {}", config.request_timeout_secs);
            println!("  search_result_limit: {}", config.search_result_limit);

            let overrides = EnvParser::get_all_vars();
            if !overrides.is_empty() {
                println!("Environment overrides:");
                for (key, value) in overrides {
                    let shown = if key.ends_with("_API_KEY") { mask(Some(&value)) } else { value.as_str() };
                    println!("  {}={}", key, shown);
                }
            }
        }

        ConfigCommands::Path => {
            let config_path = AppConfig::config_path()?;
            println!("{}", config_path.display());
        }
    }

    Ok(())
}
