//! Persists a composed report under `<root_dir>/manual_logs`

use crate::error::SnapshotError;
use crate::fs::FileSystem;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory under the run's root dir that collects snapshot files
pub const LOG_SUBDIR: &str = "manual_logs";

/// `config_check_<YYYYmmdd_HHMMSS>_Stage<stage>.txt`
pub fn snapshot_file_name(generated_at: &DateTime<Local>, stage_label: &str) -> String {
    format!(
        "config_check_{}_Stage{}.txt",
        generated_at.format("%Y%m%d_%H%M%S"),
        stage_label
    )
}

pub struct SnapshotWriter<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> SnapshotWriter<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Writes `lines` newline-joined into `root_dir/manual_logs/<file_name>`
    pub fn write(
        &self,
        root_dir: &Path,
        file_name: &str,
        lines: &[String],
    ) -> Result<PathBuf, SnapshotError> {
        let dir = root_dir.join(LOG_SUBDIR);
        self.fs
            .create_dir_all(&dir)
            .map_err(|e| SnapshotError::Write {
                path: dir.clone(),
                reason: format!("{:#}", e),
            })?;
        debug!(dir = %dir.display(), "Snapshot directory ready");

        let path = dir.join(file_name);
        self.fs
            .write(&path, &lines.join("\n"))
            .map_err(|e| SnapshotError::Write {
                path: path.clone(),
                reason: format!("{:#}", e),
            })?;

        info!(path = %path.display(), "Snapshot written");
        Ok(path)
    }
}
