//! # linkbind-pipeline
//!
//! The conversion pipeline: attachment synthesis, the per-record conversion
//! driver, and the batch orchestrator.
//!
//! Records are processed strictly sequentially; a record's failure is
//! classified into an [`linkbind_core::Outcome`] and never aborts the run.

pub mod attach;
pub mod batch;
pub mod driver;
pub mod memory_host;

pub use attach::build_attachment_set;
pub use batch::{BatchParams, BatchRunner};
pub use driver::{ConvertParams, RecordConverter};
pub use memory_host::MemoryHost;
