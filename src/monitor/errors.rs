use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised while sampling memory or capturing a diagnostic snapshot.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Memory stats unavailable: {0}")]
    StatsUnavailable(String),

    #[error("Snapshot capture failed: {0}")]
    CaptureFailed(String),

    #[error("Snapshot capture timed out after {0:?}")]
    CaptureTimedOut(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MonitorError {
    pub fn log_error(&self) {
        match self {
            MonitorError::StatsUnavailable(reason) => {
                error!(target: "heap_sentry::stats", "Memory stats unavailable: {}", reason);
            }
            MonitorError::CaptureFailed(reason) => {
                error!(target: "heap_sentry::capture", "Snapshot capture failed: {}", reason);
            }
            MonitorError::CaptureTimedOut(limit) => {
                warn!(target: "heap_sentry::capture", ?limit, "Snapshot capture timed out, gate reset to idle");
            }
            MonitorError::Io(e) => {
                error!(target: "heap_sentry::capture", "Snapshot I/O error: {}", e);
                debug!("Snapshot I/O error details: {:?}", e);
            }
            MonitorError::Json(e) => {
                error!(target: "heap_sentry::capture", "Snapshot serialization error: {}", e);
                debug!("Snapshot serialization error details: {:?}", e);
            }
        }
    }

    pub fn is_stats_unavailable(&self) -> bool {
        matches!(self, MonitorError::StatsUnavailable(_))
    }
}
