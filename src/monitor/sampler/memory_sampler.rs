use std::sync::Arc;
use tracing::debug;

use crate::monitor::errors::MonitorError;
use crate::monitor::gate::{CaptureDecision, SnapshotGate};
use crate::monitor::stats::{MemoryReading, MemoryStats};

/// Outcome of one sample-and-decide pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    pub reading: MemoryReading,
    pub utilization: f64,
    /// `None` when utilization did not exceed the danger threshold
    pub decision: Option<CaptureDecision>,
}

/// Query surface over a memory source. Every usage read doubles as a
/// pressure check that may ask the gate for a snapshot.
pub struct MemorySampler {
    stats: Arc<dyn MemoryStats>,
    gate: SnapshotGate,
    danger_threshold: f64,
}

impl MemorySampler {
    pub fn new(stats: Arc<dyn MemoryStats>, gate: SnapshotGate, danger_threshold: f64) -> Self {
        Self {
            stats,
            gate,
            danger_threshold,
        }
    }

    pub fn gate(&self) -> &SnapshotGate {
        &self.gate
    }

    pub fn danger_threshold(&self) -> f64 {
        self.danger_threshold
    }

    /// Total physical memory in bytes, freshly queried.
    pub async fn total_memory(&self) -> Result<u64, MonitorError> {
        let reading = self.stats.query_memory().await?;
        Ok(reading.total_bytes())
    }

    /// Active memory in bytes. May start a background capture as a side
    /// effect; the capture's fate never affects the returned figure.
    pub async fn used_memory(&self) -> Result<u64, MonitorError> {
        let sample = self.sample().await?;
        Ok(sample.reading.active_bytes())
    }

    pub async fn sample(&self) -> Result<PressureSample, MonitorError> {
        let reading = self.stats.query_memory().await?;
        let utilization = reading.utilization();

        let decision = if utilization > self.danger_threshold {
            Some(self.gate.request_capture())
        } else {
            None
        };

        debug!(
            target: "heap_sentry::sampler",
            total_bytes = reading.total_bytes(),
            active_bytes = reading.active_bytes(),
            utilization,
            ?decision,
            "Sampled memory"
        );

        Ok(PressureSample {
            reading,
            utilization,
            decision,
        })
    }
}
