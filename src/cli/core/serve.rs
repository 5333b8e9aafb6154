use clap::Args;
use anyhow::Result;
use tracing::info;

use crate::services::SimpleServices;
use crate::web;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn execute(args: ServeArgs, services: &SimpleServices) -> Result<()> {
    let config = services.config();
    let bind = args.bind.unwrap_or_else(|| config.bind_addr.clone());
    let port = args.port.unwrap_or(config.port);

    info!("Starting lyrics bridge (cache: {})", config.database_path.display());
    web::serve(&bind, port, services.orchestrator()).await?;
    Ok(())
}
