//! Core types and shared functionality for the APOD image cache.
//!
//! This crate provides:
//! - Content-addressed image cache with SQLite metadata index
//! - Collaborator traits for descriptor lookup and byte download
//! - Cache manager with dedup-by-hash population
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod source;

pub use cache::{CacheEntry, CacheLocation, EntryId, ImageCache};
pub use error::Error;
pub use manager::{CacheManager, CacheOutcome, Stage};
pub use source::{DescriptorSource, ImageDownloader, MediaDescriptor, MediaKind};
