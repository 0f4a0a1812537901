//! apod entry point.
//!
//! Logging goes to stderr so stdout carries only command output.

use anyhow::{Context, Result};
use apod_core::ImageCache;
use apod_core::config::AppConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(root) = cli.root {
        config.cache_root = root;
    }

    let cache = ImageCache::initialize(&config.cache_root)
        .await
        .with_context(|| format!("failed to open image cache under {}", config.cache_root.display()))?;

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Commands::Fetch(args) => commands::fetch(&config, cache, args, &mut stdout).await,
        Commands::Show(args) => commands::show(&cache, args, &mut stdout).await,
        Commands::List => commands::list(&cache, &mut stdout).await,
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
