//! Cache location resolution and first-use setup.
//!
//! [`ImageCache::initialize`] is the only way to obtain a cache handle, so
//! no operation can run against a location that has not been set up.

use super::connection::CacheDb;
use super::entries::{CacheEntry, EntryId};
use crate::Error;
use std::path::{Path, PathBuf};

/// Name of the image directory created under the root directory.
pub const IMAGE_DIR_NAME: &str = "Image Cache Directory";

/// Name of the index file inside the image directory.
pub const INDEX_FILE_NAME: &str = "image_cache.db";

/// Resolved directory and index paths of a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLocation {
    pub image_dir: PathBuf,
    pub index_path: PathBuf,
}

impl CacheLocation {
    /// Location under `root`, without touching the filesystem.
    pub fn under(root: &Path) -> Self {
        let image_dir = root.join(IMAGE_DIR_NAME);
        let index_path = image_dir.join(INDEX_FILE_NAME);
        Self { image_dir, index_path }
    }
}

/// Handle to an initialized cache: its location plus the open index.
#[derive(Debug, Clone)]
pub struct ImageCache {
    location: CacheLocation,
    db: CacheDb,
}

impl ImageCache {
    /// Create the image directory and index under `root` if absent.
    ///
    /// Safe to call on an existing cache: the directory is reused and the
    /// index only receives migrations it has not seen yet.
    pub async fn initialize(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        tokio::fs::create_dir_all(root.join(IMAGE_DIR_NAME)).await?;

        let root = tokio::fs::canonicalize(root).await?;
        let location = CacheLocation::under(&root);

        let fresh = !tokio::fs::try_exists(&location.index_path).await?;
        let db = CacheDb::open(&location.index_path).await?;

        if fresh {
            tracing::info!("created image cache index at {}", location.index_path.display());
        } else {
            tracing::debug!("opened image cache index at {}", location.index_path.display());
        }

        Ok(Self { location, db })
    }

    pub fn location(&self) -> &CacheLocation {
        &self.location
    }

    /// Directory holding the cached image files.
    pub fn image_dir(&self) -> &Path {
        &self.location.image_dir
    }

    pub fn db(&self) -> &CacheDb {
        &self.db
    }

    /// Entry for an id previously returned by the cache manager.
    pub async fn find_by_id(&self, id: EntryId) -> Result<CacheEntry, Error> {
        self.db.find_by_id(id).await
    }

    /// Every cached title in insertion order.
    pub async fn list_titles(&self) -> Result<Vec<String>, Error> {
        self.db.list_titles().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_under_root() {
        let location = CacheLocation::under(Path::new("/home/user/apod"));
        assert_eq!(location.image_dir, PathBuf::from("/home/user/apod/Image Cache Directory"));
        assert_eq!(
            location.index_path,
            PathBuf::from("/home/user/apod/Image Cache Directory/image_cache.db")
        );
    }

    #[tokio::test]
    async fn test_initialize_creates_directory_and_index() {
        let root = tempfile::tempdir().unwrap();
        let cache = ImageCache::initialize(root.path()).await.unwrap();

        assert!(cache.image_dir().is_dir());
        assert!(cache.location().index_path.is_file());
        assert!(cache.image_dir().is_absolute());
        assert!(cache.list_titles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_creates_missing_root() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");

        let cache = ImageCache::initialize(&nested).await.unwrap();
        assert!(cache.image_dir().starts_with(std::fs::canonicalize(&nested).unwrap()));
    }

    #[tokio::test]
    async fn test_initialize_twice_preserves_contents() {
        let root = tempfile::tempdir().unwrap();

        let first = ImageCache::initialize(root.path()).await.unwrap();
        let image = first.image_dir().join("Moon.jpg");
        std::fs::write(&image, b"moon").unwrap();
        let id = first
            .db()
            .insert_entry("Moon", "Our moon.", &image.to_string_lossy(), "abc123")
            .await
            .unwrap();
        drop(first);

        let second = ImageCache::initialize(root.path()).await.unwrap();
        assert_eq!(second.list_titles().await.unwrap(), vec!["Moon"]);
        assert_eq!(second.find_by_id(id).await.unwrap().hash, "abc123");
        assert_eq!(std::fs::read(&image).unwrap(), b"moon");
    }

    #[tokio::test]
    async fn test_initialize_fails_when_root_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let result = ImageCache::initialize(&file).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
