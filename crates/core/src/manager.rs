//! Cache population for a single date.
//!
//! `ensure_cached` walks: descriptor -> URL -> download -> hash -> dedup
//! check, then on a miss: path -> file write -> index insert. Every failure
//! ends the walk with a non-id outcome; nothing is retried.

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::Error;
use crate::cache::{EntryId, ImageCache, hash::content_hash, path::derive_path, store};
use crate::source::{DescriptorSource, ImageDownloader};

/// Step at which `ensure_cached` gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Descriptor,
    Download,
    Lookup,
    Write,
    Insert,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Descriptor => "descriptor fetch",
            Stage::Download => "image download",
            Stage::Lookup => "dedup lookup",
            Stage::Write => "image write",
            Stage::Insert => "index insert",
        };
        f.write_str(name)
    }
}

/// Result of [`CacheManager::ensure_cached`].
#[derive(Debug)]
pub enum CacheOutcome {
    /// New image stored under a new id.
    Added(EntryId),
    /// Same bytes were already cached under this id.
    Existing(EntryId),
    /// The record for the date has no resolvable image.
    NoImage,
    Failed { stage: Stage, error: Error },
}

impl CacheOutcome {
    /// Id of the cached entry, if one was produced or found.
    pub fn id(&self) -> Option<EntryId> {
        match self {
            CacheOutcome::Added(id) | CacheOutcome::Existing(id) => Some(*id),
            CacheOutcome::NoImage | CacheOutcome::Failed { .. } => None,
        }
    }

    /// Id, or `0` when no entry was produced.
    pub fn id_or_zero(&self) -> EntryId {
        self.id().unwrap_or(0)
    }

    fn failed(stage: Stage, error: Error) -> Self {
        if error.is_transient() {
            tracing::warn!(%stage, "caching aborted: {error}");
        } else {
            tracing::error!(%stage, "caching aborted: {error}");
        }
        CacheOutcome::Failed { stage, error }
    }
}

/// Populates an [`ImageCache`] from a descriptor source and a downloader.
pub struct CacheManager<S, D> {
    cache: ImageCache,
    source: S,
    downloader: D,
    writer: Mutex<()>,
}

impl<S, D> CacheManager<S, D>
where
    S: DescriptorSource,
    D: ImageDownloader,
{
    pub fn new(cache: ImageCache, source: S, downloader: D) -> Self {
        Self { cache, source, downloader, writer: Mutex::new(()) }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Make sure the image for `date` is cached and report its id.
    ///
    /// Calling this again for a date whose image bytes are unchanged finds
    /// the existing row by hash and writes nothing.
    pub async fn ensure_cached(&self, date: NaiveDate) -> CacheOutcome {
        tracing::debug!(%date, "ensuring image is cached");

        let descriptor = match self.source.get_descriptor(date).await {
            Ok(d) => d,
            Err(e) => return CacheOutcome::failed(Stage::Descriptor, e),
        };
        if let Err(e) = descriptor.validate() {
            return CacheOutcome::failed(Stage::Descriptor, e);
        }

        let url = descriptor.resolve_image_url();
        if url.is_empty() {
            tracing::info!(%date, kind = ?descriptor.media_kind, "record has no image URL");
            return CacheOutcome::NoImage;
        }

        let bytes = match self.downloader.download(url).await {
            Ok(b) => b,
            Err(e) => return CacheOutcome::failed(Stage::Download, e),
        };

        let hash = content_hash(&bytes);

        // Held from the dedup check until the row is in, so two callers on
        // this handle cannot both miss on the same hash.
        let _guard = self.writer.lock().await;

        match self.cache.db().find_by_hash(&hash).await {
            Ok(Some(id)) => {
                tracing::debug!(%date, id, "image already cached");
                return CacheOutcome::Existing(id);
            }
            Ok(None) => {}
            Err(e) => return CacheOutcome::failed(Stage::Lookup, e),
        }

        let path = derive_path(self.cache.image_dir(), &descriptor.title, url);
        let path_text = path.to_string_lossy();
        if store::image_exists(&path).await {
            match self.cache.db().find_by_path(&path_text).await {
                Ok(Some(owner)) => {
                    tracing::warn!(
                        %date,
                        owner,
                        path = %path_text,
                        "title collides with a cached entry; overwriting its file"
                    );
                }
                Ok(None) => tracing::debug!(path = %path_text, "overwriting unindexed file"),
                Err(e) => return CacheOutcome::failed(Stage::Lookup, e),
            }
        }

        if let Err(e) = store::write_image(&path, &bytes).await {
            return CacheOutcome::failed(Stage::Write, e);
        }

        match self
            .cache
            .db()
            .insert_entry(&descriptor.title, &descriptor.explanation, &path_text, &hash)
            .await
        {
            Ok(id) => {
                tracing::info!(%date, id, path = %path_text, "cached new image");
                CacheOutcome::Added(id)
            }
            Err(e) => CacheOutcome::failed(Stage::Insert, e),
        }
    }
}
