mod capture_state;
mod gate_metrics;
pub mod snapshot_gate;

pub use gate_metrics::GateStats;
pub use snapshot_gate::{CaptureDecision, GatePolicy, SnapshotGate};
