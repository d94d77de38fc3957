//! Training script inspection: every script-derived field in one pass

use super::branch::{resolve_resume_path, ResumeSource};
use super::dataset::{extract_dataset_paths, ExtractionStrategy};
use super::patterns::extract_scalars;
use serde::Serialize;
use tracing::info;

/// Output directory used when the script does not assign `root_dir`
pub const DEFAULT_ROOT_DIR: &str = "./checkpoints";

/// Fields recovered from the training script without running it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedTrainingInfo {
    pub training_stage: Option<i64>,
    pub resume_path: Option<String>,
    pub resume_source: Option<ResumeSource>,
    pub config_path: Option<String>,
    pub root_dir: Option<String>,
    pub dataset_paths: Vec<String>,
    pub dataset_strategy: ExtractionStrategy,
}

impl ExtractedTrainingInfo {
    /// `root_dir` from the script, or the default output directory
    pub fn effective_root_dir(&self) -> &str {
        self.root_dir.as_deref().unwrap_or(DEFAULT_ROOT_DIR)
    }
}

/// Runs the scalar patterns, the branch resolver and the list extractor over `content`
pub fn extract_training_info(content: &str) -> ExtractedTrainingInfo {
    let scalars = extract_scalars(content);
    let resume = resolve_resume_path(content, scalars.training_stage);
    let datasets = extract_dataset_paths(content);

    let info = ExtractedTrainingInfo {
        training_stage: scalars.training_stage,
        resume_path: resume.as_ref().map(|r| r.path.clone()),
        resume_source: resume.map(|r| r.source),
        config_path: scalars.config_path,
        root_dir: scalars.root_dir,
        dataset_paths: datasets.paths,
        dataset_strategy: datasets.strategy,
    };

    info!(
        stage = ?info.training_stage,
        resume = info.resume_path.is_some(),
        datasets = info.dataset_paths.len(),
        "Training script inspected"
    );
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::dataset::DYNAMIC_PATH;

    const STAGE_ONE_SCRIPT: &str = r#"
import os
from cldm.model import create_model

TRAINING_STAGE = 1
config_path = './models_yaml/anytext2_sd15.yaml'

if TRAINING_STAGE == 1:
    resume_path = './models/anytext_v2_base.ckpt'
else:
    resume_path = './checkpoints/stage1_final.ckpt'

root_dir = './runs/anytext2'

if __name__ == '__main__':
    json_paths = [
        './data/laion/data.json',
        os.path.join(DATA_ROOT, 'wukong.json'),
    ]
"#;

    #[test]
    fn test_stage_one_script() {
        let info = extract_training_info(STAGE_ONE_SCRIPT);
        assert_eq!(info.training_stage, Some(1));
        assert_eq!(
            info.resume_path.as_deref(),
            Some("./models/anytext_v2_base.ckpt")
        );
        assert_eq!(info.resume_source, Some(ResumeSource::ImageGen));
        assert_eq!(
            info.config_path.as_deref(),
            Some("./models_yaml/anytext2_sd15.yaml")
        );
        assert_eq!(info.effective_root_dir(), "./runs/anytext2");
        assert_eq!(
            info.dataset_paths,
            vec!["./data/laion/data.json", DYNAMIC_PATH]
        );
        assert_eq!(info.dataset_strategy, ExtractionStrategy::SyntaxTree);
    }

    #[test]
    fn test_empty_script_gives_defaults() {
        let info = extract_training_info("");
        assert_eq!(info.training_stage, None);
        assert_eq!(info.resume_path, None);
        assert_eq!(info.resume_source, None);
        assert_eq!(info.config_path, None);
        assert_eq!(info.effective_root_dir(), DEFAULT_ROOT_DIR);
        assert!(info.dataset_paths.is_empty());
    }
}
