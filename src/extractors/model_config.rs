//! Best-effort lookups in the model YAML document
//!
//! Only two settings are read. Missing keys fall back to their documented
//! defaults; a missing or malformed document leaves both settings unknown.

use crate::fs::FileSystem;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
enum DocumentError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("Invalid YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Expected a mapping at `{0}`")]
    NotAMapping(String),
}

/// The `context_injection_config` setting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Injection {
    /// Key absent from an otherwise readable document
    NotSet,
    Mapping(Mapping),
    Value(Value),
}

/// Settings read from the model document; `None` means it could not be determined
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YamlConfigInfo {
    pub injection: Option<Injection>,
    pub use_calligraphy: Option<bool>,
}

/// Resolves the injection and calligraphy settings from the document at `path`
pub fn resolve_model_config<F: FileSystem>(fs: &F, path: &Path) -> YamlConfigInfo {
    if !fs.exists(path) {
        warn!(path = %path.display(), "Model config document not found");
        return YamlConfigInfo::default();
    }

    let document = match load_document(fs, path) {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, "Model config document could not be parsed");
            return YamlConfigInfo::default();
        }
    };

    let info = read_settings(&document);
    debug!(?info, "Model config resolved");
    info
}

fn load_document<F: FileSystem>(fs: &F, path: &Path) -> Result<Value, DocumentError> {
    let content = fs.read_to_string(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        reason: format!("{:#}", e),
    })?;

    serde_yaml::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_settings(document: &Value) -> YamlConfigInfo {
    let params = match model_params(document) {
        Ok(params) => params,
        Err(e) => {
            error!(error = %e, "Unexpected model config layout");
            return YamlConfigInfo::default();
        }
    };

    let injection = match params.get("context_injection_config") {
        None => Injection::NotSet,
        Some(Value::Mapping(map)) => Injection::Mapping(map.clone()),
        Some(other) => Injection::Value(other.clone()),
    };

    let use_calligraphy = match calligraphy_flag(&params) {
        Ok(flag) => flag,
        Err(e) => {
            error!(error = %e, "Unexpected embedding manager layout");
            None
        }
    };

    YamlConfigInfo {
        injection: Some(injection),
        use_calligraphy,
    }
}

fn model_params(document: &Value) -> Result<Mapping, DocumentError> {
    let root = document
        .as_mapping()
        .ok_or_else(|| DocumentError::NotAMapping("<root>".to_string()))?;
    let model = child_mapping(root, "model", "model")?;
    child_mapping(&model, "params", "model.params")
}

fn calligraphy_flag(params: &Mapping) -> Result<Option<bool>, DocumentError> {
    let manager = child_mapping(
        params,
        "embedding_manager_config",
        "model.params.embedding_manager_config",
    )?;
    let manager_params = child_mapping(
        &manager,
        "params",
        "model.params.embedding_manager_config.params",
    )?;

    match manager_params.get("use_calligraphy_style") {
        None => Ok(Some(false)),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(other) => {
            warn!(value = ?other, "use_calligraphy_style is not a boolean");
            Ok(None)
        }
    }
}

/// Nested mapping under `key`; absent keys yield an empty mapping
fn child_mapping(parent: &Mapping, key: &str, dotted: &str) -> Result<Mapping, DocumentError> {
    match parent.get(key) {
        None => Ok(Mapping::new()),
        Some(Value::Mapping(map)) => Ok(map.clone()),
        Some(_) => Err(DocumentError::NotAMapping(dotted.to_string())),
    }
}
