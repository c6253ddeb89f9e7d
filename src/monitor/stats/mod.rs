pub mod memory_reading;
pub mod memory_stats;
pub mod sysinfo_stats;

pub use memory_reading::MemoryReading;
pub use memory_stats::MemoryStats;
pub use sysinfo_stats::SysinfoMemoryStats;
