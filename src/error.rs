//! Errors that abort a snapshot run
//!
//! Everything else degrades to a visible default inside the report.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Training script not found: {0}")]
    ScriptNotFound(PathBuf),
    #[error("Failed to read training script {path}: {reason}")]
    ScriptRead { path: PathBuf, reason: String },
    #[error("Failed to write snapshot to {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}
