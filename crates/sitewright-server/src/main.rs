//! Sitewright server binary
//!
//! Starts the HTTP generation service.

use anyhow::Context;
use clap::Parser;
use sitewright_server::{config::ServerConfig, init_tracing, start_server};
use std::path::PathBuf;
use tracing::warn;

/// Sitewright - prompt-to-website generation service
#[derive(Parser, Debug)]
#[command(name = "sitewright-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SITEWRIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address override (address:port)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("No config file specified, using defaults");
            ServerConfig::default()
        }
    };

    config.apply_env_overrides();
    if let Some(bind) = &cli.bind {
        config.set_bind(bind)?;
    }

    start_server(config).await?;
    Ok(())
}
