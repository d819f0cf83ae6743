//! Ingestion counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared ingestion metrics
#[derive(Debug, Default)]
pub struct IngestMetrics {
    /// Total payloads received from sensor callbacks
    pub payloads_received: AtomicU64,

    /// Total frames projected and stored
    pub frames_projected: AtomicU64,

    /// Payloads rejected by a projector
    pub format_errors: AtomicU64,
}

impl IngestMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record payload received
    pub fn record_received(&self) {
        self.payloads_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record frame projected and stored
    pub fn record_projected(&self) {
        self.frames_projected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record payload rejected with a format error
    pub fn record_format_error(&self) {
        self.format_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot {
            payloads_received: self.payloads_received.load(Ordering::Relaxed),
            frames_projected: self.frames_projected.load(Ordering::Relaxed),
            format_errors: self.format_errors.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestSnapshot {
    /// Total payloads received
    pub payloads_received: u64,

    /// Total frames projected and stored
    pub frames_projected: u64,

    /// Payloads rejected by a projector
    pub format_errors: u64,
}
