//! Record Conversion Driver: converts one record's URL cell into an
//! attachment on its target cell.
//!
//! The driver is a plain sequence of awaited host calls. Every error is
//! caught at the step where it occurs and classified into an [`Outcome`];
//! nothing propagates to the batch orchestrator.

use chrono::Utc;
use tracing::{debug, warn};

use linkbind_core::{
    file_name_from_url, is_valid_url, normalize_trimmed, Attachment, CellValue, FailReason,
    Outcome, SkipReason, TableHost,
};
use linkbind_fetch::ContentSource;

use crate::attach::build_attachment_set;

/// Parameters for one record conversion.
#[derive(Debug, Clone)]
pub struct ConvertParams {
    /// Field holding the link-like text value.
    pub source_field_id: String,
    /// Attachment field to write.
    pub target_field_id: String,
    /// Replace existing attachments instead of appending.
    pub overwrite: bool,
    /// Try the same-origin relay before the direct fetch path.
    pub prefer_relay: bool,
}

/// Converts single records; holds no cross-record state.
pub struct RecordConverter<'a> {
    host: &'a dyn TableHost,
    source: &'a dyn ContentSource,
}

impl<'a> RecordConverter<'a> {
    pub fn new(host: &'a dyn TableHost, source: &'a dyn ContentSource) -> Self {
        Self { host, source }
    }

    /// Run the full read → normalize → validate → fetch → upload → write →
    /// verify sequence for one record.
    pub async fn convert_record(&self, record_id: &str, params: &ConvertParams) -> Outcome {
        if record_id.trim().is_empty() {
            return Outcome::Skipped(SkipReason::EmptyRecordId);
        }

        // READ_SOURCE + NORMALIZE
        let raw = match self
            .host
            .read_cell(&params.source_field_id, record_id)
            .await
        {
            Ok(value) => value,
            Err(e) => return Outcome::Failed(FailReason::Host(e.to_string())),
        };
        let Some(url) = normalize_trimmed(&CellValue::from_json(&raw)) else {
            debug!(component = "driver", record_id, "no URL in source cell");
            return Outcome::Skipped(SkipReason::NoUrl);
        };

        // VALIDATE
        if !is_valid_url(&url) {
            return Outcome::Failed(FailReason::InvalidUrl(url));
        }

        // CHECK_EXISTING: skip before any fetch when append mode finds the
        // target already populated.
        let existing = match self
            .host
            .read_cell(&params.target_field_id, record_id)
            .await
        {
            Ok(value) => Attachment::list_from_json(&value),
            Err(e) => return Outcome::Failed(FailReason::Host(e.to_string())),
        };
        if !params.overwrite && !existing.is_empty() {
            debug!(
                component = "driver",
                record_id,
                existing = existing.len(),
                "target already holds attachments"
            );
            return Outcome::Skipped(SkipReason::AlreadyAttached);
        }

        // FETCH
        let payload = match self.source.fetch(&url, params.prefer_relay).await {
            Ok(payload) => payload,
            Err(e) => return Outcome::Failed(FailReason::from_fetch_error(&e)),
        };
        let file_name = file_name_from_url(&url);

        // UPLOAD
        let token = match self.host.upload_binary(&payload, &file_name).await {
            Ok(token) => token,
            Err(e) => return Outcome::Failed(FailReason::Upload(e.to_string())),
        };

        // SYNTHESIZE + WRITE
        let new_record = Attachment {
            token: token.clone(),
            name: file_name,
            size: payload.size,
            content_type: payload.content_type.clone(),
            created_at: Utc::now(),
        };
        let merged = build_attachment_set(&existing, new_record, params.overwrite);
        let expected_count = merged.len();
        if let Err(e) = self
            .host
            .write_attachments(&params.target_field_id, record_id, &merged)
            .await
        {
            return Outcome::Failed(FailReason::Write(e.to_string()));
        }

        // VERIFY: best-effort read-back.
        let observed = self
            .host
            .read_cell(&params.target_field_id, record_id)
            .await
            .ok()
            .map(|value| Attachment::list_from_json(&value));

        let outcome = classify_verification(
            params.overwrite,
            expected_count,
            &token,
            observed.as_deref(),
        );
        if let Outcome::Success { unverified: true } = outcome {
            warn!(
                component = "driver",
                record_id, "write accepted but read-back was ambiguous"
            );
        }
        outcome
    }
}

/// Verification decision table.
///
/// Token presence is sufficient but not necessary: hosts may re-key tokens
/// on write, so a count at or above the expected count also passes. An
/// overwrite that reads back empty conclusively failed. An ambiguous
/// append-mode read-back is reported as success with a diagnostic flag —
/// a strict failure there is a false negative more often than a true one.
fn classify_verification(
    overwrite: bool,
    expected_count: usize,
    token: &str,
    observed: Option<&[Attachment]>,
) -> Outcome {
    match observed {
        Some(list) if list.iter().any(|a| a.token == token) => Outcome::success(),
        Some(list) if list.len() >= expected_count => Outcome::success(),
        Some(list) if overwrite && list.is_empty() => Outcome::Failed(FailReason::VerifyMismatch(
            "overwrite read back an empty attachment cell".to_string(),
        )),
        None if overwrite => Outcome::Failed(FailReason::VerifyMismatch(
            "overwrite read-back failed".to_string(),
        )),
        _ => Outcome::Success { unverified: true },
    }
}
