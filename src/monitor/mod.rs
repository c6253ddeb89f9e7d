pub mod capture;
pub mod errors;
pub mod gate;
pub mod poller;
pub mod sampler;
pub mod stats;

pub use capture::{DiagnosticSnapshotWriter, SnapshotCapture, SnapshotRecord};
pub use errors::MonitorError;
pub use gate::{CaptureDecision, GatePolicy, GateStats, SnapshotGate};
pub use poller::{MemoryPoller, PollSummary};
pub use sampler::{MemorySampler, PressureSample};
pub use stats::{MemoryReading, MemoryStats, SysinfoMemoryStats};
