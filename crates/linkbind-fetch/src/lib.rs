//! # linkbind-fetch
//!
//! Resolves a URL to a binary payload for the conversion pipeline.
//!
//! Tries a same-origin relay endpoint first (to sidestep cross-origin
//! restrictions) and falls back to a direct GET; enforces the payload size
//! ceiling before and after reading the body.

pub mod config;
pub mod fetcher;

pub use config::FetchConfig;
pub use fetcher::{ContentFetcher, ContentSource};
