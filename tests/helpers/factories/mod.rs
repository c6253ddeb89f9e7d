pub mod capture_factory;
pub mod memory_stats_factory;

pub use capture_factory::{CaptureBehavior, CaptureFactory, RecordingCapture};
pub use memory_stats_factory::{MemoryStatsFactory, StubMemoryStats};
