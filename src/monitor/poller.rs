use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::monitor::gate::CaptureDecision;
use crate::monitor::sampler::MemorySampler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub polls: u64,
    pub failures: u64,
}

/// Drives a `MemorySampler` on a fixed cadence until shut down.
pub struct MemoryPoller {
    sampler: Arc<MemorySampler>,
    period: Duration,
}

impl MemoryPoller {
    /// `period` must be non-zero.
    pub fn new(sampler: Arc<MemorySampler>, period: Duration) -> Self {
        Self { sampler, period }
    }

    pub async fn run<F>(self, shutdown: F) -> PollSummary
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut summary = PollSummary::default();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    summary.polls += 1;
                    match self.sampler.sample().await {
                        Ok(sample) => {
                            if sample.decision == Some(CaptureDecision::Started) {
                                warn!(
                                    target: "heap_sentry::poller",
                                    utilization = sample.utilization,
                                    active_bytes = sample.reading.active_bytes(),
                                    "Danger threshold crossed"
                                );
                            }
                        }
                        Err(e) => {
                            summary.failures += 1;
                            e.log_error();
                        }
                    }
                }
            }
        }

        info!(
            target: "heap_sentry::poller",
            polls = summary.polls,
            failures = summary.failures,
            "Memory poller stopped"
        );
        summary
    }
}
