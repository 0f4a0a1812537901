//! Subcommand handlers.
//!
//! Handlers write to a caller-supplied sink so output can be checked in tests.

use std::io::Write;

use anyhow::{Context, Result};
use apod_client::{ApodClient, ApodConfig, FetchClient, FetchConfig, parse_date};
use apod_core::config::AppConfig;
use apod_core::{CacheEntry, CacheManager, CacheOutcome, EntryId, ImageCache};
use chrono::NaiveDate;

use crate::cli::{FetchArgs, ShowArgs};

/// Resolve the optional DATE argument against `today`.
pub fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match input {
        Some(raw) => Ok(parse_date(raw, today)?),
        None => Ok(today),
    }
}

pub async fn fetch(config: &AppConfig, cache: ImageCache, args: &FetchArgs, out: &mut impl Write) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let date = resolve_date(args.date.as_deref(), today)?;

    let source = ApodClient::new(ApodConfig::from(config))?;
    let downloader = FetchClient::new(FetchConfig::from(config))?;
    let manager = CacheManager::new(cache, source, downloader);

    let outcome = manager.ensure_cached(date).await;
    report_outcome(manager.cache(), date, &outcome, args.json, out).await
}

/// Print what `ensure_cached` produced for `date`.
pub async fn report_outcome(
    cache: &ImageCache, date: NaiveDate, outcome: &CacheOutcome, json: bool, out: &mut impl Write,
) -> Result<()> {
    let Some(id) = outcome.id() else {
        match outcome {
            CacheOutcome::Failed { stage, error } => {
                writeln!(out, "nothing to display for {date}: {stage} failed ({error})")?;
            }
            _ => writeln!(out, "nothing to display for {date}: no image in the record")?,
        }
        return Ok(());
    };

    let entry = cache.find_by_id(id).await?;
    if json {
        write_json(&entry, out)?;
    } else {
        let status = if matches!(outcome, CacheOutcome::Added(_)) { "added" } else { "already cached" };
        writeln!(out, "#{} {} ({status})", entry.id, entry.title)?;
        writeln!(out, "{}", entry.path)?;
    }
    Ok(())
}

pub async fn show(cache: &ImageCache, args: &ShowArgs, out: &mut impl Write) -> Result<()> {
    let entry = lookup(cache, args.id).await?;
    if args.json {
        write_json(&entry, out)?;
    } else {
        writeln!(out, "{}", entry.title)?;
        writeln!(out, "{}", entry.path)?;
        writeln!(out)?;
        writeln!(out, "{}", entry.explanation)?;
    }
    Ok(())
}

pub async fn list(cache: &ImageCache, out: &mut impl Write) -> Result<()> {
    let titles = cache.list_titles().await?;
    if titles.is_empty() {
        writeln!(out, "cache is empty")?;
        return Ok(());
    }
    for (position, title) in titles.iter().enumerate() {
        writeln!(out, "{:>4}  {title}", position + 1)?;
    }
    Ok(())
}

async fn lookup(cache: &ImageCache, id: EntryId) -> Result<CacheEntry> {
    cache.find_by_id(id).await.with_context(|| format!("no cached entry with id {id}"))
}

fn write_json(entry: &CacheEntry, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, entry)?;
    writeln!(out)?;
    Ok(())
}
