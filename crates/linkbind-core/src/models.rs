//! Data model for the conversion pipeline.
//!
//! The source-cell model is an explicit tagged union built at the ingestion
//! boundary from whatever JSON the host hands back, so downstream code works
//! with a total pattern match instead of ad hoc type inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::defaults;
use crate::error::{Error, FetchErrorKind};

// =============================================================================
// SOURCE CELL
// =============================================================================

/// One rich-text segment of a source cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Link sub-value. Preferred over `text` during normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Display-text sub-value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Segment {
    /// Build a segment from a JSON object, ignoring unknown keys.
    fn from_object(obj: &serde_json::Map<String, JsonValue>) -> Self {
        let as_string = |key: &str| obj.get(key).and_then(JsonValue::as_str).map(str::to_owned);
        Segment {
            link: as_string("link"),
            text: as_string("text"),
        }
    }
}

/// Tagged union over the shapes a URL-bearing cell arrives in.
///
/// Hosts return a bare string, an ordered list of rich-text segments, or a
/// single segment object, depending on the field type. Anything else
/// degrades to `Empty` rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Missing or unrecognized cell value.
    Empty,
    /// Plain string cell.
    Plain(String),
    /// Ordered rich-text segments.
    Segments(Vec<Segment>),
    /// A single rich-text segment object.
    SingleSegment(Segment),
}

impl CellValue {
    /// Ingest a raw host cell value. Total: never fails, never panics.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Empty,
            JsonValue::String(s) => CellValue::Plain(s.clone()),
            JsonValue::Array(items) => {
                let segments = items
                    .iter()
                    .map(|item| match item {
                        JsonValue::Object(obj) => Segment::from_object(obj),
                        JsonValue::String(s) => Segment {
                            link: None,
                            text: Some(s.clone()),
                        },
                        _ => Segment::default(),
                    })
                    .collect();
                CellValue::Segments(segments)
            }
            JsonValue::Object(obj) => CellValue::SingleSegment(Segment::from_object(obj)),
            _ => CellValue::Empty,
        }
    }
}

// =============================================================================
// FETCHED PAYLOAD
// =============================================================================

/// Binary content fetched from a remote URL.
#[derive(Debug, Clone)]
pub struct FetchedPayload {
    /// Raw bytes of the resource.
    pub bytes: Vec<u8>,
    /// Realized size in bytes. Always `> 0` and `<= MAX_PAYLOAD_BYTES`.
    pub size: u64,
    /// Content type; `application/octet-stream` when the response had none.
    pub content_type: String,
}

impl FetchedPayload {
    /// Build a payload, defaulting the content type when absent or blank.
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        let size = bytes.len() as u64;
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| defaults::DEFAULT_CONTENT_TYPE.to_string());
        Self {
            bytes,
            size,
            content_type,
        }
    }
}

// =============================================================================
// TARGET CELL (ATTACHMENTS)
// =============================================================================

/// The host's representation of one uploaded binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Opaque upload token returned by the host's upload primitive.
    pub token: String,
    /// File name shown to users.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME content type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Parse one attachment entry from host JSON, filling missing fields
    /// with safe defaults. The token is preserved verbatim.
    pub fn from_json(value: &JsonValue) -> Self {
        let obj = value.as_object();
        let field = |key: &str| {
            obj.and_then(|o| o.get(key))
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
        };
        let token = field("token").unwrap_or_default();
        let name = field("name").unwrap_or_else(|| defaults::DEFAULT_FILE_NAME.to_string());
        let size = obj
            .and_then(|o| o.get("size"))
            .and_then(JsonValue::as_u64)
            .unwrap_or(0);
        let content_type =
            field("type").unwrap_or_else(|| defaults::DEFAULT_CONTENT_TYPE.to_string());
        let created_at = field("createdAt")
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            .unwrap_or_else(Utc::now);
        Self {
            token,
            name,
            size,
            content_type,
            created_at,
        }
    }

    /// Parse a target-cell value into attachment entries.
    ///
    /// `null` and non-array shapes yield an empty list; order is preserved.
    pub fn list_from_json(value: &JsonValue) -> Vec<Attachment> {
        match value {
            JsonValue::Array(items) => items.iter().map(Attachment::from_json).collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Why a record was skipped without any fetch or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The host listing produced an empty record id.
    EmptyRecordId,
    /// The source cell held no usable URL.
    NoUrl,
    /// Overwrite is disabled and the target cell already has attachments.
    AlreadyAttached,
}

/// Why a record failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FailReason {
    /// A host read call failed before any write was attempted.
    Host(String),
    /// The normalized value is not an absolute http/https URL.
    InvalidUrl(String),
    /// Fetching the remote content failed.
    Fetch {
        kind: FetchErrorKind,
        message: String,
    },
    /// The host's upload primitive failed.
    Upload(String),
    /// Writing the attachment cell failed.
    Write(String),
    /// Verification conclusively showed the write did not land.
    VerifyMismatch(String),
}

impl FailReason {
    /// Short tag for events and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            FailReason::Host(_) => "host",
            FailReason::InvalidUrl(_) => "invalid-url",
            FailReason::Fetch { .. } => "fetch",
            FailReason::Upload(_) => "upload",
            FailReason::Write(_) => "write",
            FailReason::VerifyMismatch(_) => "verify-mismatch",
        }
    }

    /// Classify an error raised by a fetch step.
    pub fn from_fetch_error(err: &Error) -> Self {
        match err {
            Error::Fetch { kind, message } => FailReason::Fetch {
                kind: *kind,
                message: message.clone(),
            },
            other => FailReason::Fetch {
                kind: FetchErrorKind::Network,
                message: other.to_string(),
            },
        }
    }
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailReason::Host(msg) => write!(f, "host call failed: {msg}"),
            FailReason::InvalidUrl(url) => write!(f, "invalid URL: {url}"),
            FailReason::Fetch { kind, message } => write!(f, "fetch failed ({kind}): {message}"),
            FailReason::Upload(msg) => write!(f, "upload failed: {msg}"),
            FailReason::Write(msg) => write!(f, "write failed: {msg}"),
            FailReason::VerifyMismatch(msg) => write!(f, "verification failed: {msg}"),
        }
    }
}

/// Per-record classification. Exactly one of success, failed, or skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The attachment landed. `unverified` marks the append-mode case where
    /// the write call succeeded but the read-back was ambiguous.
    Success { unverified: bool },
    /// The record failed; the batch continues.
    Failed(FailReason),
    /// Nothing to do for this record.
    Skipped(SkipReason),
}

impl Outcome {
    /// Verified success.
    pub fn success() -> Self {
        Outcome::Success { unverified: false }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Short tag for events and logs: `success`, `failed`, or `skipped`.
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "success",
            Outcome::Failed(_) => "failed",
            Outcome::Skipped(_) => "skipped",
        }
    }
}

// =============================================================================
// RUN STATE
// =============================================================================

/// Transient per-run counters, owned by the batch orchestrator.
///
/// A value object threaded through the run, never a process-wide singleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Number of records in this run.
    pub total: usize,
    /// Records completed so far (monotonically increasing).
    pub current: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunState {
    /// Fresh state for a run over `total` records.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Record one finished outcome and advance the cursor.
    pub fn record(&mut self, outcome: &Outcome) {
        self.current += 1;
        match outcome {
            Outcome::Success { .. } => self.success += 1,
            Outcome::Failed(_) => self.failed += 1,
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }

    /// Final counts for the run.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.total,
            success: self.success,
            failed: self.failed,
            skipped: self.skipped,
        }
    }
}

/// Aggregate counts reported at end of run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_value_from_null() {
        assert_eq!(CellValue::from_json(&JsonValue::Null), CellValue::Empty);
    }

    #[test]
    fn test_cell_value_from_string() {
        assert_eq!(
            CellValue::from_json(&json!("https://a.b/c")),
            CellValue::Plain("https://a.b/c".to_string())
        );
    }

    #[test]
    fn test_cell_value_from_segment_array() {
        let value = json!([{"link": "https://a.b", "text": "a.b", "style": {}}]);
        let CellValue::Segments(segments) = CellValue::from_json(&value) else {
            panic!("expected Segments");
        };
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].link.as_deref(), Some("https://a.b"));
        assert_eq!(segments[0].text.as_deref(), Some("a.b"));
    }

    #[test]
    fn test_cell_value_from_string_array() {
        let value = json!(["https://a.b"]);
        let CellValue::Segments(segments) = CellValue::from_json(&value) else {
            panic!("expected Segments");
        };
        assert_eq!(segments[0].text.as_deref(), Some("https://a.b"));
    }

    #[test]
    fn test_cell_value_from_single_object() {
        let value = json!({"text": "https://a.b"});
        assert_eq!(
            CellValue::from_json(&value),
            CellValue::SingleSegment(Segment {
                link: None,
                text: Some("https://a.b".to_string()),
            })
        );
    }

    #[test]
    fn test_cell_value_from_number_is_empty() {
        assert_eq!(CellValue::from_json(&json!(42)), CellValue::Empty);
    }

    #[test]
    fn test_payload_defaults_content_type() {
        let payload = FetchedPayload::new(vec![1, 2, 3], None);
        assert_eq!(payload.size, 3);
        assert_eq!(payload.content_type, "application/octet-stream");

        let payload = FetchedPayload::new(vec![1], Some("  ".to_string()));
        assert_eq!(payload.content_type, "application/octet-stream");

        let payload = FetchedPayload::new(vec![1], Some("image/png".to_string()));
        assert_eq!(payload.content_type, "image/png");
    }

    #[test]
    fn test_attachment_lenient_parse() {
        let value = json!([
            {"token": "tok1", "name": "a.png", "size": 10, "type": "image/png",
             "createdAt": "2026-01-02T03:04:05Z"},
            {"token": "tok2"},
        ]);
        let attachments = Attachment::list_from_json(&value);
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].token, "tok1");
        assert_eq!(attachments[0].name, "a.png");
        assert_eq!(attachments[1].token, "tok2");
        assert_eq!(attachments[1].name, "file");
        assert_eq!(attachments[1].size, 0);
        assert_eq!(attachments[1].content_type, "application/octet-stream");
    }

    #[test]
    fn test_attachment_list_from_non_array() {
        assert!(Attachment::list_from_json(&JsonValue::Null).is_empty());
        assert!(Attachment::list_from_json(&json!("nope")).is_empty());
    }

    #[test]
    fn test_run_state_counts() {
        let mut state = RunState::new(3);
        state.record(&Outcome::success());
        state.record(&Outcome::Skipped(SkipReason::NoUrl));
        state.record(&Outcome::Failed(FailReason::Upload("boom".into())));
        assert_eq!(state.current, 3);
        assert_eq!(
            state.summary(),
            RunSummary {
                total: 3,
                success: 1,
                failed: 1,
                skipped: 1,
            }
        );
    }

    #[test]
    fn test_outcome_tags() {
        assert_eq!(Outcome::success().tag(), "success");
        assert_eq!(Outcome::Skipped(SkipReason::NoUrl).tag(), "skipped");
        assert_eq!(
            Outcome::Failed(FailReason::InvalidUrl("x".into())).tag(),
            "failed"
        );
    }
}
