//! File name derivation from untrusted titles and image URLs.
//!
//! ### Title
//! - Trim leading/trailing whitespace
//! - Replace each internal whitespace run with one `_`
//! - Drop every character that is not a letter, digit or `_`
//!
//! ### Extension
//! - Taken from the URL's last path segment, after the final `.`
//! - Query string and fragment are ignored
//!
//! The result is deterministic, so distinct titles that sanitize to the same
//! stem map to the same file. Dedup by content hash must run first.

use std::path::{Path, PathBuf};

/// Stem used when a title has no letters, digits or underscores.
pub const FALLBACK_STEM: &str = "untitled";

/// Upper bound on the stem length in bytes.
pub const MAX_STEM_BYTES: usize = 200;

/// Full path at which an image with this title and source URL is stored.
pub fn derive_path(cache_dir: &Path, title: &str, source_url: &str) -> PathBuf {
    let stem = sanitize_title(title);
    let file_name = match url_extension(source_url) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    };
    cache_dir.join(file_name)
}

/// Sanitized file stem for a title.
pub fn sanitize_title(title: &str) -> String {
    let underscored = title.split_whitespace().collect::<Vec<_>>().join("_");
    let mut stem: String = underscored
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if stem.is_empty() {
        return FALLBACK_STEM.to_string();
    }

    if stem.len() > MAX_STEM_BYTES {
        let mut cut = MAX_STEM_BYTES;
        while !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        stem.truncate(cut);
    }

    stem
}

/// Extension of the file a URL points at, without the dot.
///
/// Returns `None` when the last path segment has no `.`.
pub fn url_extension(source_url: &str) -> Option<String> {
    let without_query = source_url.split(['?', '#']).next().unwrap_or_default();
    let segment = without_query.rsplit('/').next().unwrap_or_default();
    let (_, ext) = segment.rsplit_once('.')?;

    let ext: String = ext.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if ext.is_empty() { None } else { Some(ext) }
}
