use crate::monitor::errors::MonitorError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::{ProcessesToUpdate, System};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMemory {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

/// Contents of one diagnostic snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub captured_at: DateTime<Utc>,
    pub pid: u32,
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
    pub host: HostMemory,
    /// Raw `/proc/self/smaps_rollup` (Linux only, when readable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smaps_rollup: Option<String>,
}

impl SnapshotRecord {
    /// Collects the current process and host memory picture. Blocking.
    pub fn collect() -> Result<Self, MonitorError> {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| MonitorError::CaptureFailed(format!("cannot resolve own pid: {}", e)))?;

        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let process = sys.process(pid).ok_or_else(|| {
            MonitorError::CaptureFailed(format!("process {} not visible to sysinfo", pid))
        })?;

        Ok(Self {
            captured_at: Utc::now(),
            pid: pid.as_u32(),
            resident_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
            host: HostMemory {
                total_bytes: sys.total_memory(),
                used_bytes: sys.used_memory(),
                available_bytes: sys.available_memory(),
            },
            smaps_rollup: read_smaps_rollup(),
        })
    }
}

#[cfg(target_os = "linux")]
fn read_smaps_rollup() -> Option<String> {
    std::fs::read_to_string("/proc/self/smaps_rollup").ok()
}

#[cfg(not(target_os = "linux"))]
fn read_smaps_rollup() -> Option<String> {
    None
}
