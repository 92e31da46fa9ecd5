//! # linkbind-core
//!
//! Core types, traits, and abstractions for the linkbind pipeline.
//!
//! This crate provides the cell-value model, the host-API trait, the error
//! taxonomy, and the progress event bus that the fetch and pipeline crates
//! depend on.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod traits;
pub mod urlcheck;

// Re-export commonly used types at crate root
pub use error::{Error, FetchErrorKind, Result};
pub use events::{ProgressBus, ProgressEvent};
pub use models::{
    Attachment, CellValue, FailReason, FetchedPayload, Outcome, RunState, RunSummary, Segment,
    SkipReason,
};
pub use normalize::{normalize, normalize_trimmed};
pub use traits::TableHost;
pub use urlcheck::{file_name_from_url, is_valid_url};
