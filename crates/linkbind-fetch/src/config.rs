//! Fetcher configuration.

use linkbind_core::defaults;

/// Configuration for the content fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the same-origin relay (e.g. `https://host.example`).
    /// `None` disables the relay path; fetches go direct.
    pub relay_base: Option<String>,
    /// Per-request timeout in seconds, applied to relay and direct calls.
    pub timeout_secs: u64,
    /// Payload size ceiling in bytes.
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            relay_base: None,
            timeout_secs: defaults::FETCH_TIMEOUT_SECS,
            max_bytes: defaults::MAX_PAYLOAD_BYTES,
        }
    }
}

impl FetchConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `LINKBIND_RELAY_BASE` | unset | Relay base URL; unset disables the relay |
    /// | `LINKBIND_FETCH_TIMEOUT_SECS` | `60` | Per-request timeout |
    pub fn from_env() -> Self {
        let relay_base = std::env::var("LINKBIND_RELAY_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let timeout_secs = std::env::var("LINKBIND_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::FETCH_TIMEOUT_SECS);

        Self {
            relay_base,
            timeout_secs,
            max_bytes: defaults::MAX_PAYLOAD_BYTES,
        }
    }

    /// Set the relay base URL.
    pub fn with_relay_base(mut self, base: impl Into<String>) -> Self {
        self.relay_base = Some(base.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the payload size ceiling.
    pub fn with_max_bytes(mut self, max: u64) -> Self {
        self.max_bytes = max;
        self
    }
}
