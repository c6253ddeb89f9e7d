use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CaptureState {
    Idle,
    Capturing { since: Instant },
}

/// Everything guarded by the gate lock. Only the check-and-transition runs
/// under it; the capture itself never does.
#[derive(Debug)]
pub(super) struct GateState {
    pub(super) capture: CaptureState,
    pub(super) last_finished: Option<Instant>,
}

impl GateState {
    pub(super) fn new() -> Self {
        Self {
            capture: CaptureState::Idle,
            last_finished: None,
        }
    }
}
