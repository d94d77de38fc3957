//! Run configuration for trainsnap
//!
//! Two path constants drive a run: the training script to inspect and the
//! model config document to fall back on when the script names none. Both can
//! be overridden through the environment, and the CLI overrides the
//! environment.
//!
//! # Environment Variables
//!
//! - `TRAINSNAP_SCRIPT`: training script path - default: "train.py"
//! - `TRAINSNAP_DEFAULT_CONFIG`: fallback model config - default: "./models_yaml/anytext2_sd15.yaml"
//! - `TRAINSNAP_LOG_LEVEL`: logging level - default: "info"
//!
//! Relative paths, including the ones found inside the script, resolve
//! against `working_dir`.

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SCRIPT_PATH: &str = "train.py";
pub const DEFAULT_CONFIG_PATH: &str = "./models_yaml/anytext2_sd15.yaml";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyPath(&'static str),

    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Training script to inspect
    pub script_path: PathBuf,

    /// Model config used when the script has no `config_path` assignment
    pub default_config_path: PathBuf,

    /// Base for every relative path
    pub working_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        let script_path = env::var("TRAINSNAP_SCRIPT")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_PATH));

        let default_config_path = env::var("TRAINSNAP_DEFAULT_CONFIG")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let log_level = env::var("TRAINSNAP_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            script_path,
            default_config_path,
            working_dir: PathBuf::from("."),
            log_level,
        }
    }
}

impl SnapshotConfig {
    /// Configuration rooted at `working_dir` with built-in path defaults
    pub fn in_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
            default_config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            working_dir: working_dir.into(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.script_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("script path"));
        }
        if self.default_config_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("default config path"));
        }
        if self.working_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("working directory"));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
    }
}

impl fmt::Display for SnapshotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trainsnap Configuration:")?;
        writeln!(f, "  Script: {}", self.script_path.display())?;
        writeln!(f, "  Default Config: {}", self.default_config_path.display())?;
        writeln!(f, "  Working Dir: {}", self.working_dir.display())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
