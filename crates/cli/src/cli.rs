//! Command-line interface definitions.
//!
//! ```bash
//! # Cache today's picture
//! apod fetch
//!
//! # Cache a specific date and print the entry as JSON
//! apod fetch 2022-05-01 --json
//!
//! # Inspect the cache
//! apod list
//! apod show 3
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Download NASA's Astronomy Picture of the Day into a local, deduplicated cache.
#[derive(Debug, Parser)]
#[command(name = "apod")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory under which "Image Cache Directory" is kept (overrides APOD_CACHE_ROOT)
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cache the picture for a date (today when omitted)
    Fetch(FetchArgs),
    /// Show one cached entry
    Show(ShowArgs),
    /// List cached titles in the order they were added
    List,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// APOD date in YYYY-MM-DD format
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Print the resulting entry as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Entry id as printed by `fetch`
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Print the entry as JSON
    #[arg(long)]
    pub json: bool,
}
