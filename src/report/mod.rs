//! Human-readable snapshot report
//!
//! The composer turns the extracted structures into ordered text lines; all
//! "Unknown" / "Not Set" sentinels are produced here and nowhere else.

pub mod render;
pub mod writer;

pub use writer::{snapshot_file_name, SnapshotWriter, LOG_SUBDIR};

use crate::extractors::{ExtractedTrainingInfo, Injection, YamlConfigInfo};
use chrono::{DateTime, Local};
use render::{display_bool, display_value};

pub const UNKNOWN: &str = "Unknown";
pub const NOT_SET: &str = "Not Set";
pub const NO_DATASETS_WARNING: &str =
    "⚠️ No dataset paths detected (check the json_paths assignment in the script)";

const BANNER: &str = "========================================";
const RULE: &str = "----------------------------------------";

/// Everything the report shows for one run
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub training: &'a ExtractedTrainingInfo,
    pub model_config: &'a YamlConfigInfo,
    pub script_path: &'a str,
    pub config_path: &'a str,
    pub generated_at: DateTime<Local>,
}

/// Display form of the stage, shared with the output file name
pub fn stage_label(stage: Option<i64>) -> String {
    stage.map_or_else(|| UNKNOWN.to_string(), |s| s.to_string())
}

/// Builds the report lines in display order
pub fn compose_report(input: &ReportInput<'_>) -> Vec<String> {
    let training = input.training;
    let model = input.model_config;
    let mut lines = Vec::new();

    lines.push(BANNER.to_string());
    lines.push("      Training Environment Snapshot".to_string());
    lines.push(BANNER.to_string());
    lines.push(format!(
        "Generated at : {}",
        input.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!("Source script: {}", input.script_path));
    lines.push(String::new());

    lines.push("[Key Settings]".to_string());
    lines.push(RULE.to_string());
    lines.push(format!(
        "• Training stage        : {}",
        stage_label(training.training_stage)
    ));
    lines.push(format!(
        "• Calligraphy style     : {}",
        model.use_calligraphy.map_or(UNKNOWN, display_bool)
    ));
    lines.push(format!(
        "• Resume checkpoint     : {}",
        training.resume_path.as_deref().unwrap_or(UNKNOWN)
    ));
    lines.push(format!(
        "  └─ Source logic       : {}",
        training.resume_source.map_or(UNKNOWN, |s| s.label())
    ));
    lines.push(String::new());

    lines.push("[Injection Config]".to_string());
    lines.push(RULE.to_string());
    match &model.injection {
        Some(Injection::Mapping(map)) => {
            for (key, value) in map {
                lines.push(format!(
                    "• {:<10}: {}",
                    display_value(key),
                    display_value(value)
                ));
            }
        }
        Some(Injection::Value(value)) => lines.push(format!("• {}", display_value(value))),
        Some(Injection::NotSet) => lines.push(format!("• {}", NOT_SET)),
        None => lines.push(format!("• {}", UNKNOWN)),
    }
    lines.push(String::new());

    lines.push("[Datasets]".to_string());
    lines.push(RULE.to_string());
    if training.dataset_paths.is_empty() {
        lines.push(NO_DATASETS_WARNING.to_string());
    }
    for path in &training.dataset_paths {
        lines.push(format!("• {}", path));
    }
    lines.push(String::new());

    lines.push("[File References]".to_string());
    lines.push(format!("• YAML Config: {}", input.config_path));

    lines
}
