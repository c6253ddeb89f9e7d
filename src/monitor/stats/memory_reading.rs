use serde::{Deserialize, Serialize};

/// One host memory sample: total physical memory and the part of it in
/// active use (reclaimable buffers/cache excluded). Both figures come from
/// the same query round-trip.
///
/// `active_bytes <= total_bytes` is expected but not enforced; readings are
/// passed through exactly as the source reported them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReading {
    total_bytes: u64,
    active_bytes: u64,
}

impl MemoryReading {
    pub fn new(total_bytes: u64, active_bytes: u64) -> Self {
        Self {
            total_bytes,
            active_bytes,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn active_bytes(&self) -> u64 {
        self.active_bytes
    }

    /// `active / total` as a float. Exceeds 1.0 for inconsistent readings,
    /// `inf` or `NaN` when `total` is zero; never panics.
    pub fn utilization(&self) -> f64 {
        self.active_bytes as f64 / self.total_bytes as f64
    }
}
