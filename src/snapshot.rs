//! One snapshot run: read script, extract, resolve config, compose, write

use crate::config::SnapshotConfig;
use crate::error::SnapshotError;
use crate::extractors::{
    extract_training_info, resolve_model_config, ExtractedTrainingInfo, YamlConfigInfo,
};
use crate::fs::FileSystem;
use crate::report::{compose_report, snapshot_file_name, stage_label, ReportInput, SnapshotWriter};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Result of inspecting one training setup
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub script_path: PathBuf,
    /// Model config path as written in the script, or the configured fallback
    pub config_path: String,
    pub training: ExtractedTrainingInfo,
    pub model_config: YamlConfigInfo,
    pub generated_at: DateTime<Local>,
    #[serde(skip)]
    pub report: Vec<String>,
    pub output_path: Option<PathBuf>,
}

impl Snapshot {
    pub fn report_text(&self) -> String {
        self.report.join("\n")
    }
}

pub struct SnapshotRunner<'a, F: FileSystem> {
    fs: &'a F,
    config: &'a SnapshotConfig,
}

impl<'a, F: FileSystem> SnapshotRunner<'a, F> {
    pub fn new(fs: &'a F, config: &'a SnapshotConfig) -> Self {
        Self { fs, config }
    }

    /// Inspects and writes in one step
    pub fn run(&self, generated_at: DateTime<Local>) -> Result<Snapshot, SnapshotError> {
        let mut snapshot = self.inspect(generated_at)?;
        self.persist(&mut snapshot)?;
        Ok(snapshot)
    }

    /// Extracts every field and composes the report without touching the output directory
    pub fn inspect(&self, generated_at: DateTime<Local>) -> Result<Snapshot, SnapshotError> {
        let script_path = self.resolve(&self.config.script_path);
        info!(script = %script_path.display(), "Inspecting training script");

        if !self.fs.is_file(&script_path) {
            error!(script = %script_path.display(), "Training script not found");
            return Err(SnapshotError::ScriptNotFound(script_path));
        }

        let content = self
            .fs
            .read_to_string(&script_path)
            .map_err(|e| SnapshotError::ScriptRead {
                path: script_path.clone(),
                reason: format!("{:#}", e),
            })?;

        let training = extract_training_info(&content);

        let config_path = training
            .config_path
            .clone()
            .unwrap_or_else(|| self.config.default_config_path.display().to_string());
        if training.config_path.is_none() {
            debug!(config = %config_path, "Script names no config_path, using fallback");
        }
        let model_config = resolve_model_config(self.fs, &self.resolve(Path::new(&config_path)));

        let script_display = self.config.script_path.display().to_string();
        let report = compose_report(&ReportInput {
            training: &training,
            model_config: &model_config,
            script_path: &script_display,
            config_path: &config_path,
            generated_at,
        });

        Ok(Snapshot {
            script_path,
            config_path,
            training,
            model_config,
            generated_at,
            report,
            output_path: None,
        })
    }

    /// Writes the composed report under the script's root dir
    pub fn persist(&self, snapshot: &mut Snapshot) -> Result<PathBuf, SnapshotError> {
        let root_dir = self.resolve(Path::new(snapshot.training.effective_root_dir()));
        let file_name = snapshot_file_name(
            &snapshot.generated_at,
            &stage_label(snapshot.training.training_stage),
        );

        let path = SnapshotWriter::new(self.fs).write(&root_dir, &file_name, &snapshot.report)?;
        snapshot.output_path = Some(path.clone());
        Ok(path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.fs.resolve(&self.config.working_dir, path)
    }
}
