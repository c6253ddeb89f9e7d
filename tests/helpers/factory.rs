pub use super::factories::{CaptureFactory, MemoryStatsFactory};

pub struct Factory;

impl Factory {
    pub fn memory_stats() -> MemoryStatsFactory {
        MemoryStatsFactory::new()
    }

    pub fn capture() -> CaptureFactory {
        CaptureFactory::new()
    }
}
