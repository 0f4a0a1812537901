//! Collaborators the cache manager consumes.
//!
//! The manager never talks HTTP itself. It asks a [`DescriptorSource`] for
//! the record of a date and an [`ImageDownloader`] for the bytes behind the
//! resolved URL.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Kind of media a descriptor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// The remote service's record for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub title: String,
    pub explanation: String,
    pub media_kind: MediaKind,
    /// Full-resolution image URL; empty when the service gave none.
    #[serde(default)]
    pub image_url: String,
    /// Video thumbnail URL; empty when the service gave none.
    #[serde(default)]
    pub thumbnail_url: String,
}

impl MediaDescriptor {
    /// URL of the image to cache, or an empty string if there is none.
    ///
    /// Images use `image_url`, videos use `thumbnail_url`.
    pub fn resolve_image_url(&self) -> &str {
        match self.media_kind {
            MediaKind::Image => &self.image_url,
            MediaKind::Video => &self.thumbnail_url,
            MediaKind::Other => "",
        }
    }

    /// Reject records that could never be indexed.
    ///
    /// The index requires a title and an explanation, so a record missing
    /// either is refused before any bytes are downloaded or written.
    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [("title", &self.title), ("explanation", &self.explanation)] {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("descriptor {field} is empty")));
            }
        }
        Ok(())
    }
}

/// Fetches the descriptor for a date.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    async fn get_descriptor(&self, date: NaiveDate) -> Result<MediaDescriptor, Error>;
}

/// Downloads raw bytes for a URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Bytes, Error>;
}
