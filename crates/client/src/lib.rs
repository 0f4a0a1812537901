//! HTTP collaborators for the APOD image cache.
//!
//! This crate provides the NASA APOD API client (descriptor lookup) and the
//! image fetch client (byte download), implementing the collaborator traits
//! the cache manager consumes.

pub mod apod;
pub mod fetch;

pub use apod::{ApodClient, ApodConfig, ApodError, parse_date};
pub use fetch::{FetchClient, FetchConfig, FetchResponse};
