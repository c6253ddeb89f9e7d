pub mod snapshot_capture;
pub mod snapshot_record;
pub mod snapshot_writer;

pub use snapshot_capture::SnapshotCapture;
pub use snapshot_record::{HostMemory, SnapshotRecord};
pub use snapshot_writer::DiagnosticSnapshotWriter;
