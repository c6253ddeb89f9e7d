use crate::monitor::errors::MonitorError;
use crate::monitor::stats::{MemoryReading, MemoryStats};
use parking_lot::Mutex;
use std::sync::Arc;
use sysinfo::System;
use tracing::debug;

/// `MemoryStats` backed by `sysinfo`.
///
/// `used_memory()` is reported as active memory: on Linux sysinfo derives it
/// from `MemAvailable`, so reclaimable buffers and page cache are excluded.
pub struct SysinfoMemoryStats {
    system: Arc<Mutex<System>>,
}

impl SysinfoMemoryStats {
    pub fn new() -> Self {
        Self {
            system: Arc::new(Mutex::new(System::new())),
        }
    }
}

impl Default for SysinfoMemoryStats {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MemoryStats for SysinfoMemoryStats {
    async fn query_memory(&self) -> Result<MemoryReading, MonitorError> {
        let system = Arc::clone(&self.system);

        // Refresh and both reads happen under one lock on a blocking thread
        let reading = tokio::task::spawn_blocking(move || {
            let mut sys = system.lock();
            sys.refresh_memory();
            MemoryReading::new(sys.total_memory(), sys.used_memory())
        })
        .await
        .map_err(|e| MonitorError::StatsUnavailable(format!("memory query task failed: {}", e)))?;

        // sysinfo reports zeros when it cannot read the host counters
        if reading.total_bytes() == 0 {
            return Err(MonitorError::StatsUnavailable(
                "host reported zero total memory".to_string(),
            ));
        }

        debug!(
            target: "heap_sentry::stats",
            total_bytes = reading.total_bytes(),
            active_bytes = reading.active_bytes(),
            "Queried host memory"
        );
        Ok(reading)
    }
}
