//! Content-addressed image cache with a SQLite metadata index.
//!
//! This module provides the persistent side of the cache:
//!
//! - Location bootstrap (image directory + index file)
//! - SHA-256 content hashing used as the dedup key
//! - Automatic schema migrations
//! - Deterministic file names derived from untrusted titles
//! - Append-only metadata index (insert, lookup by hash/id, list titles)

pub mod bootstrap;
pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;
pub mod path;
pub mod store;

pub use crate::Error;

pub use bootstrap::{CacheLocation, ImageCache};
pub use connection::CacheDb;
pub use entries::{CacheEntry, EntryId};
