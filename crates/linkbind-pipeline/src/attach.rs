//! Attachment Synthesizer: merge a new attachment into a target cell.

use linkbind_core::Attachment;

/// Build the attachment list to write back to the target cell.
///
/// Under overwrite, or with nothing pre-existing, the result is exactly the
/// new record. Otherwise existing entries are preserved in order (they were
/// already normalized at ingestion, tokens untouched) and the new record is
/// appended at the end.
pub fn build_attachment_set(
    existing: &[Attachment],
    new_record: Attachment,
    overwrite: bool,
) -> Vec<Attachment> {
    if overwrite || existing.is_empty() {
        return vec![new_record];
    }

    let mut merged = existing.to_vec();
    merged.push(new_record);
    merged
}
