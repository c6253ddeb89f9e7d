use crate::monitor::errors::MonitorError;
use crate::monitor::stats::MemoryReading;

/// Source of host memory figures.
///
/// Implementations must return total and active memory from a single OS
/// query so the derived ratio is never computed from figures taken at
/// different instants. Failure to reach the source is `StatsUnavailable`.
#[async_trait::async_trait]
pub trait MemoryStats: Send + Sync {
    async fn query_memory(&self) -> Result<MemoryReading, MonitorError>;
}
