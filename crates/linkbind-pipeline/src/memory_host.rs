//! In-memory [`TableHost`] for tests and embedding without a live host.
//!
//! Carries failure-injection knobs (failing upload/write, dropped writes,
//! token re-keying on write) so the driver's verification decision table
//! can be exercised branch by branch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use linkbind_core::{Attachment, Error, FetchedPayload, Result, TableHost};

#[derive(Default)]
struct Cells {
    /// (field_id, record_id) → raw cell value.
    by_slot: HashMap<(String, String), JsonValue>,
    /// view_id → visible record ids, in order.
    views: HashMap<String, Vec<String>>,
}

/// In-memory table host.
#[derive(Default)]
pub struct MemoryHost {
    cells: Mutex<Cells>,
    upload_seq: AtomicU64,
    fail_upload: AtomicBool,
    fail_write: AtomicBool,
    /// Writes report success but do not land.
    drop_writes: AtomicBool,
    /// Writes land, but with host-assigned tokens replacing the uploaded ones.
    rekey_on_write: AtomicBool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view and its visible record order.
    pub fn set_view(&self, view_id: &str, record_ids: &[&str]) {
        let mut cells = self.cells.lock().unwrap();
        cells.views.insert(
            view_id.to_string(),
            record_ids.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Set one cell's raw value.
    pub fn set_cell(&self, field_id: &str, record_id: &str, value: JsonValue) {
        let mut cells = self.cells.lock().unwrap();
        cells
            .by_slot
            .insert((field_id.to_string(), record_id.to_string()), value);
    }

    /// Current raw value of one cell (`null` when unset).
    pub fn cell(&self, field_id: &str, record_id: &str) -> JsonValue {
        let cells = self.cells.lock().unwrap();
        cells
            .by_slot
            .get(&(field_id.to_string(), record_id.to_string()))
            .cloned()
            .unwrap_or(JsonValue::Null)
    }

    /// Number of uploads accepted so far.
    pub fn upload_count(&self) -> u64 {
        self.upload_seq.load(Ordering::SeqCst)
    }

    pub fn fail_uploads(&self, on: bool) {
        self.fail_upload.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_write.store(on, Ordering::SeqCst);
    }

    pub fn drop_writes(&self, on: bool) {
        self.drop_writes.store(on, Ordering::SeqCst);
    }

    pub fn rekey_on_write(&self, on: bool) {
        self.rekey_on_write.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl TableHost for MemoryHost {
    async fn list_visible_record_ids(&self, view_id: &str) -> Result<Vec<String>> {
        let cells = self.cells.lock().unwrap();
        cells
            .views
            .get(view_id)
            .cloned()
            .ok_or_else(|| Error::Host(format!("unknown view: {view_id}")))
    }

    async fn read_cell(&self, field_id: &str, record_id: &str) -> Result<JsonValue> {
        Ok(self.cell(field_id, record_id))
    }

    async fn write_attachments(
        &self,
        field_id: &str,
        record_id: &str,
        attachments: &[Attachment],
    ) -> Result<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(Error::Write("injected write failure".to_string()));
        }
        if self.drop_writes.load(Ordering::SeqCst) {
            return Ok(());
        }

        let stored: Vec<Attachment> = if self.rekey_on_write.load(Ordering::SeqCst) {
            attachments
                .iter()
                .enumerate()
                .map(|(i, a)| Attachment {
                    token: format!("host-{record_id}-{i}"),
                    ..a.clone()
                })
                .collect()
        } else {
            attachments.to_vec()
        };

        self.set_cell(field_id, record_id, serde_json::to_value(stored)?);
        Ok(())
    }

    async fn upload_binary(&self, _payload: &FetchedPayload, _file_name: &str) -> Result<String> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(Error::Upload("injected upload failure".to_string()));
        }
        let n = self.upload_seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("tok-{n}"))
    }
}
