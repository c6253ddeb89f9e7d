use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::capture_state::{CaptureState, GateState};
use super::gate_metrics::{GateMetrics, GateStats};
use crate::monitor::capture::SnapshotCapture;
use crate::monitor::errors::MonitorError;
use crate::shared::config::CaptureConfig;

/// Rate policy applied on top of single-flight.
///
/// The default (no cooldown, no timeout) allows a new capture as soon as the
/// previous one finishes and waits on a hung collaborator indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatePolicy {
    /// Minimum time between the end of one capture and the start of the next
    pub cooldown: Duration,
    /// A capture running longer than this is abandoned and the gate reopens
    pub timeout: Option<Duration>,
}

impl GatePolicy {
    pub fn from_config(cfg: &CaptureConfig) -> Self {
        Self {
            cooldown: cfg.cooldown(),
            timeout: cfg.timeout(),
        }
    }
}

/// Result of asking the gate for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDecision {
    Started,
    AlreadyCapturing,
    CoolingDown { remaining: Duration },
}

impl CaptureDecision {
    pub fn is_started(&self) -> bool {
        matches!(self, CaptureDecision::Started)
    }
}

struct GateInner {
    capture: Arc<dyn SnapshotCapture>,
    policy: GatePolicy,
    state: Mutex<GateState>,
    metrics: GateMetrics,
}

/// Single-flight guard around the snapshot collaborator.
///
/// Cloning is cheap and every clone shares the same capture state, so one
/// gate can be handed to any number of samplers.
#[derive(Clone)]
pub struct SnapshotGate {
    inner: Arc<GateInner>,
}

/// Proof that this caller moved the gate to `Capturing`. Dropping it moves
/// the gate back to `Idle`, whatever happened to the capture.
struct CapturePermit {
    inner: Arc<GateInner>,
    started: Instant,
}

impl Drop for CapturePermit {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        state.capture = CaptureState::Idle;
        state.last_finished = Some(Instant::now());
    }
}

impl SnapshotGate {
    pub fn new(capture: Arc<dyn SnapshotCapture>, policy: GatePolicy) -> Self {
        Self {
            inner: Arc::new(GateInner {
                capture,
                policy,
                state: Mutex::new(GateState::new()),
                metrics: GateMetrics::default(),
            }),
        }
    }

    pub fn policy(&self) -> GatePolicy {
        self.inner.policy
    }

    pub fn stats(&self) -> GateStats {
        self.inner.metrics.snapshot()
    }

    /// Starts a capture on a background task unless one is already running
    /// or the cooldown has not elapsed. Never waits for the capture and never
    /// reports its outcome to the caller. Must be called within a tokio runtime.
    pub fn request_capture(&self) -> CaptureDecision {
        match self.try_begin() {
            Ok(permit) => {
                tokio::spawn(run_capture(Arc::clone(&self.inner), permit));
                CaptureDecision::Started
            }
            Err(decision) => decision,
        }
    }

    /// Same admission rules as `request_capture`, but the capture runs on the
    /// calling task and this returns once it has finished (or timed out).
    pub async fn capture_now(&self) -> CaptureDecision {
        match self.try_begin() {
            Ok(permit) => {
                run_capture(Arc::clone(&self.inner), permit).await;
                CaptureDecision::Started
            }
            Err(decision) => decision,
        }
    }

    fn try_begin(&self) -> Result<CapturePermit, CaptureDecision> {
        let now = Instant::now();
        let mut state = self.inner.state.lock();

        let current = state.capture;
        if let CaptureState::Capturing { since } = current {
            drop(state);
            self.inner.metrics.record_skipped_in_flight();
            debug!(
                target: "heap_sentry::gate",
                running_for_ms = now.saturating_duration_since(since).as_millis() as u64,
                "Capture already in flight, request ignored"
            );
            return Err(CaptureDecision::AlreadyCapturing);
        }

        let last_finished = state.last_finished;
        if let Some(finished) = last_finished {
            let quiet = now.saturating_duration_since(finished);
            if quiet < self.inner.policy.cooldown {
                drop(state);
                let remaining = self.inner.policy.cooldown - quiet;
                self.inner.metrics.record_skipped_cooldown();
                debug!(
                    target: "heap_sentry::gate",
                    remaining_ms = remaining.as_millis() as u64,
                    "Capture cooling down, request ignored"
                );
                return Err(CaptureDecision::CoolingDown { remaining });
            }
        }

        state.capture = CaptureState::Capturing { since: now };
        drop(state);

        self.inner.metrics.record_started();
        Ok(CapturePermit {
            inner: Arc::clone(&self.inner),
            started: now,
        })
    }
}

async fn run_capture(inner: Arc<GateInner>, permit: CapturePermit) {
    warn!(target: "heap_sentry::gate", "Memory pressure detected, capturing snapshot");

    let attempt = AssertUnwindSafe(inner.capture.capture_snapshot()).catch_unwind();
    let outcome = match inner.policy.timeout {
        Some(limit) => match tokio::time::timeout(limit, attempt).await {
            Ok(result) => result,
            Err(_) => Ok(Err(MonitorError::CaptureTimedOut(limit))),
        },
        None => attempt.await,
    };
    let outcome = outcome
        .unwrap_or_else(|payload| Err(MonitorError::CaptureFailed(panic_message(&*payload))));

    let elapsed = permit.started.elapsed();
    drop(permit);

    match outcome {
        Ok(()) => {
            inner.metrics.record_completed();
            info!(
                target: "heap_sentry::gate",
                elapsed_ms = elapsed.as_millis() as u64,
                "Snapshot capture completed"
            );
        }
        Err(e @ MonitorError::CaptureTimedOut(_)) => {
            inner.metrics.record_timed_out();
            e.log_error();
        }
        Err(e) => {
            inner.metrics.record_failed();
            let e = match e {
                MonitorError::CaptureFailed(_) => e,
                other => MonitorError::CaptureFailed(other.to_string()),
            };
            e.log_error();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("capture panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("capture panicked: {}", msg)
    } else {
        "capture panicked".to_string()
    }
}
