//! Host-API trait for linkbind abstractions.
//!
//! The table-editing host supplies record listing, cell access, and the
//! attachment-upload primitive. Modeling these behind a trait keeps the
//! pipeline testable without a live host.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::{Attachment, FetchedPayload};

/// Access to the host's table, record, field, and upload primitives.
///
/// Every method stands for a remote call that may fail with a host-defined
/// error; the pipeline treats any such failure as a per-record outcome,
/// never a batch abort.
#[async_trait]
pub trait TableHost: Send + Sync {
    /// Record ids of the chosen view, in the host's visible order.
    ///
    /// View-level sort/filter is the host's responsibility and opaque here;
    /// the returned order is the processing order for a run.
    async fn list_visible_record_ids(&self, view_id: &str) -> Result<Vec<String>>;

    /// Raw value of one cell. Shape depends on the field type; source cells
    /// are ingested through [`crate::models::CellValue::from_json`] and
    /// target cells through [`Attachment::list_from_json`].
    async fn read_cell(&self, field_id: &str, record_id: &str) -> Result<JsonValue>;

    /// Replace the attachment list of a target cell.
    async fn write_attachments(
        &self,
        field_id: &str,
        record_id: &str,
        attachments: &[Attachment],
    ) -> Result<()>;

    /// Upload fetched bytes, returning the host's opaque attachment token.
    async fn upload_binary(&self, payload: &FetchedPayload, file_name: &str) -> Result<String>;
}
