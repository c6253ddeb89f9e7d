use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::monitor::capture::{SnapshotCapture, SnapshotRecord};
use crate::monitor::errors::MonitorError;
use crate::shared::config::CaptureConfig;

/// Writes each capture as a pretty-printed JSON `SnapshotRecord`:
///   <output_dir>/<prefix>-<pid>-<UTC timestamp>.json
///
/// The record is written to a `.tmp` sibling first and renamed into place,
/// so a file carrying the final name is always complete.
#[derive(Debug, Clone)]
pub struct DiagnosticSnapshotWriter {
    output_dir: PathBuf,
    file_prefix: String,
}

impl DiagnosticSnapshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: "heap".to_string(),
        }
    }

    pub fn from_config(cfg: &CaptureConfig) -> Self {
        Self::new(&cfg.output_dir).with_prefix(&cfg.file_prefix)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name_for(&self, record: &SnapshotRecord) -> String {
        format!(
            "{}-{}-{}.json",
            self.file_prefix,
            record.pid,
            record.captured_at.format("%Y%m%dT%H%M%S%.3fZ")
        )
    }

    /// Collects a record and persists it. Blocking; returns the final path.
    pub fn write_snapshot(&self) -> Result<PathBuf, MonitorError> {
        let record = SnapshotRecord::collect()?;
        self.write_record(&record)
    }

    pub fn write_record(&self, record: &SnapshotRecord) -> Result<PathBuf, MonitorError> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(self.file_name_for(record));
        let tmp_path = path.with_extension("json.tmp");

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        fs::rename(&tmp_path, &path)?;
        debug!(target: "snapshot_writer::write_record", path = %path.display(), "Renamed snapshot into place");
        Ok(path)
    }
}

#[async_trait::async_trait]
impl SnapshotCapture for DiagnosticSnapshotWriter {
    async fn capture_snapshot(&self) -> Result<(), MonitorError> {
        let writer = self.clone();
        let path = tokio::task::spawn_blocking(move || writer.write_snapshot())
            .await
            .map_err(|e| MonitorError::CaptureFailed(format!("snapshot task failed: {}", e)))??;

        info!(target: "snapshot_writer::capture", path = %path.display(), "Wrote diagnostic snapshot");
        Ok(())
    }
}
