//! Image byte storage inside the cache directory.

use crate::Error;
use std::path::Path;

/// Write image bytes to `path`, creating or truncating the file.
///
/// There is no partial-write recovery; the index row is inserted only after
/// this returns `Ok`.
pub async fn write_image(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    tokio::fs::write(path, bytes).await?;
    tracing::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Whether a stored image exists at `path`.
pub async fn image_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
