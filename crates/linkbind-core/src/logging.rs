//! Structured logging schema and field name constants for linkbind.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work the same across the fetcher and the pipeline.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | A record failed for a reason an operator should look at |
//! | WARN  | Recoverable issue, fallback applied (relay miss, unverified write) |
//! | INFO  | Run lifecycle (start, summary), per-record success |
//! | DEBUG | Decision points (relay vs direct, skip reasons, config choices) |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ─── Identity fields ───────────────────────────────────────────────────────

/// Component within the pipeline.
/// Values: "fetcher", "driver", "batch"
pub const COMPONENT: &str = "component";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Record id being operated on.
pub const RECORD_ID: &str = "record_id";

/// View id driving a batch run.
pub const VIEW_ID: &str = "view_id";

/// Target URL of a fetch.
pub const URL: &str = "url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Payload size in bytes.
pub const PAYLOAD_BYTES: &str = "payload_bytes";

/// 1-based record index within a run.
pub const RUN_INDEX: &str = "run_index";

/// Total records in a run.
pub const RUN_TOTAL: &str = "run_total";

/// Initialize tracing with an env-filter subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` for linkbind crates. Intended for
/// binaries and integration harnesses; embedders with their own subscriber
/// should skip this.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
