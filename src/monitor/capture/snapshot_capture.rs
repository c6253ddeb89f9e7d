use crate::monitor::errors::MonitorError;

/// Produces one diagnostic artifact describing the process's memory.
///
/// Where the artifact lands and how it is encoded are up to the
/// implementation; callers only observe completion and success.
#[async_trait::async_trait]
pub trait SnapshotCapture: Send + Sync {
    async fn capture_snapshot(&self) -> Result<(), MonitorError>;
}
