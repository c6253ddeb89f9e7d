use crate::monitor::capture::SnapshotCapture;
use crate::monitor::errors::MonitorError;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureBehavior {
    Succeed,
    Fail,
    Panic,
    Hang,
}

/// Capture collaborator that records how it was driven.
pub struct RecordingCapture {
    behavior: CaptureBehavior,
    delay: Duration,
    gate: Option<Semaphore>,
    calls: AtomicUsize,
    finished: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a RecordingCapture);

impl<'a> InFlight<'a> {
    fn enter(capture: &'a RecordingCapture) -> Self {
        let now = capture.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        capture.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(capture)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.0.finished.fetch_add(1, Ordering::SeqCst);
    }
}

impl RecordingCapture {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Captures that have returned, failed, panicked, or been dropped.
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Lets `n` held captures proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }
}

#[async_trait::async_trait]
impl SnapshotCapture for RecordingCapture {
    async fn capture_snapshot(&self) -> Result<(), MonitorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _in_flight = InFlight::enter(self);

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("capture gate closed").forget();
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.behavior {
            CaptureBehavior::Succeed => Ok(()),
            CaptureBehavior::Fail => Err(MonitorError::CaptureFailed("disk full".into())),
            CaptureBehavior::Panic => panic!("capture exploded"),
            CaptureBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}

pub struct CaptureFactory {
    behavior: CaptureBehavior,
    delay: Duration,
    held: bool,
}

impl CaptureFactory {
    pub fn new() -> Self {
        Self {
            behavior: CaptureBehavior::Succeed,
            delay: Duration::ZERO,
            held: false,
        }
    }

    pub fn with_behavior(mut self, behavior: CaptureBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every capture blocks until `RecordingCapture::release` is called.
    pub fn held(mut self) -> Self {
        self.held = true;
        self
    }

    pub fn create(self) -> Arc<RecordingCapture> {
        Arc::new(RecordingCapture {
            behavior: self.behavior,
            delay: self.delay,
            gate: self.held.then(|| Semaphore::new(0)),
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }
}
