//! Batch Orchestrator: sequential conversion over a view's visible records.

use tracing::{debug, info, warn};

use linkbind_core::{Outcome, ProgressBus, ProgressEvent, RunState, RunSummary, TableHost};
use linkbind_fetch::ContentSource;

use crate::driver::{ConvertParams, RecordConverter};

/// Parameters for one batch run.
#[derive(Debug, Clone)]
pub struct BatchParams {
    pub source_field_id: String,
    pub target_field_id: String,
    /// Replace existing attachments instead of appending.
    pub overwrite: bool,
    /// Try the same-origin relay before the direct fetch path.
    pub prefer_relay: bool,
}

impl BatchParams {
    fn convert_params(&self) -> ConvertParams {
        ConvertParams {
            source_field_id: self.source_field_id.clone(),
            target_field_id: self.target_field_id.clone(),
            overwrite: self.overwrite,
            prefer_relay: self.prefer_relay,
        }
    }
}

/// Runs batches, one record at a time, and owns the only cross-record state.
pub struct BatchRunner<'a> {
    host: &'a dyn TableHost,
    source: &'a dyn ContentSource,
    bus: ProgressBus,
}

impl<'a> BatchRunner<'a> {
    pub fn new(host: &'a dyn TableHost, source: &'a dyn ContentSource) -> Self {
        Self {
            host,
            source,
            bus: ProgressBus::default(),
        }
    }

    /// Use an externally owned progress bus instead of a fresh one.
    pub fn with_bus(mut self, bus: ProgressBus) -> Self {
        self.bus = bus;
        self
    }

    /// Progress bus for subscribing to per-record and summary events.
    pub fn bus(&self) -> &ProgressBus {
        &self.bus
    }

    /// Convert every visible record of `view_id`, in the host's order.
    pub async fn run_view(&self, view_id: &str, params: &BatchParams) -> RunSummary {
        let record_ids = match self.host.list_visible_record_ids(view_id).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(component = "batch", view_id, error = %e, "could not list records");
                Vec::new()
            }
        };
        self.run(&record_ids, params).await
    }

    /// Convert the given records strictly in order. Failed records are never
    /// retried within the run; an empty listing returns immediately.
    pub async fn run(&self, record_ids: &[String], params: &BatchParams) -> RunSummary {
        let mut state = RunState::new(record_ids.len());
        if record_ids.is_empty() {
            let summary = state.summary();
            self.bus.emit(ProgressEvent::Finished { summary });
            return summary;
        }

        info!(
            component = "batch",
            run_total = state.total,
            overwrite = params.overwrite,
            "starting batch run"
        );

        let converter = RecordConverter::new(self.host, self.source);
        let convert_params = params.convert_params();

        for record_id in record_ids {
            let outcome = converter.convert_record(record_id, &convert_params).await;
            state.record(&outcome);
            self.report(record_id, &state, &outcome);
        }

        let summary = state.summary();
        info!(
            component = "batch",
            total = summary.total,
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch run finished"
        );
        self.bus.emit(ProgressEvent::Finished { summary });
        summary
    }

    fn report(&self, record_id: &str, state: &RunState, outcome: &Outcome) {
        let reason = match outcome {
            Outcome::Success { unverified: false } => None,
            Outcome::Success { unverified: true } => Some("unverified".to_string()),
            Outcome::Failed(reason) => Some(reason.to_string()),
            Outcome::Skipped(reason) => serde_json::to_value(reason)
                .ok()
                .and_then(|v| v.as_str().map(str::to_owned)),
        };

        match outcome {
            Outcome::Success { .. } => debug!(
                component = "batch",
                record_id,
                run_index = state.current,
                run_total = state.total,
                "record converted"
            ),
            Outcome::Skipped(_) => debug!(
                component = "batch",
                record_id,
                run_index = state.current,
                run_total = state.total,
                reason = reason.as_deref().unwrap_or("-"),
                "record skipped"
            ),
            Outcome::Failed(_) => warn!(
                component = "batch",
                record_id,
                run_index = state.current,
                run_total = state.total,
                reason = reason.as_deref().unwrap_or("-"),
                "record failed"
            ),
        }

        self.bus.emit(ProgressEvent::Record {
            index: state.current,
            total: state.total,
            record_id: record_id.to_string(),
            outcome: outcome.tag(),
            reason,
        });
    }
}
