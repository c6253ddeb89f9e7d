use crate::monitor::errors::MonitorError;
use crate::monitor::stats::{MemoryReading, MemoryStats};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays a scripted sequence of readings; the last entry repeats forever.
pub struct StubMemoryStats {
    script: Mutex<VecDeque<Result<MemoryReading, String>>>,
    fallback: Result<MemoryReading, String>,
    queries: AtomicUsize,
}

impl StubMemoryStats {
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MemoryStats for StubMemoryStats {
    async fn query_memory(&self) -> Result<MemoryReading, MonitorError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        next.map_err(MonitorError::StatsUnavailable)
    }
}

pub struct MemoryStatsFactory {
    steps: Vec<Result<MemoryReading, String>>,
}

impl MemoryStatsFactory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_reading(mut self, total_bytes: u64, active_bytes: u64) -> Self {
        self.steps
            .push(Ok(MemoryReading::new(total_bytes, active_bytes)));
        self
    }

    pub fn with_failure(mut self, reason: &str) -> Self {
        self.steps.push(Err(reason.to_string()));
        self
    }

    pub fn create(self) -> Arc<StubMemoryStats> {
        let mut steps = self.steps;
        let fallback = steps
            .pop()
            .unwrap_or_else(|| Ok(MemoryReading::new(1000, 400)));
        Arc::new(StubMemoryStats {
            script: Mutex::new(steps.into()),
            fallback,
            queries: AtomicUsize::new(0),
        })
    }
}
