//! Centralized default constants for the linkbind pipeline.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// PAYLOAD LIMITS
// =============================================================================

/// Hard ceiling on a fetched payload, in bytes (20 MiB).
///
/// Checked twice: against a declared `Content-Length` header before the body
/// is read, and against the realized size after the body is read.
pub const MAX_PAYLOAD_BYTES: u64 = 20 * 1024 * 1024;

// =============================================================================
// PAYLOAD DEFAULTS
// =============================================================================

/// Content type assumed when the response declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// File name used when none can be derived from the URL path.
pub const DEFAULT_FILE_NAME: &str = "file";

// =============================================================================
// RELAY
// =============================================================================

/// Path of the same-origin relay endpoint, relative to the relay base URL.
pub const RELAY_PROXY_PATH: &str = "/api/proxy";

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Per-request timeout for relay and direct fetches (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Maximum characters of an error-response body carried in a fetch error.
pub const ERROR_BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// EVENTS
// =============================================================================

/// Capacity of the progress broadcast channel.
pub const PROGRESS_BUS_CAPACITY: usize = 256;
