// Static extraction from training scripts and model config documents
//
// Nothing here executes the inspected script. Every lookup degrades to an
// absent value instead of failing the run.

pub mod branch;
pub mod dataset;
pub mod model_config;
pub mod patterns;
pub mod script;

pub use branch::{resolve_resume_path, ResolvedResume, ResumeSource};
pub use dataset::{
    extract_dataset_paths, DatasetPaths, ExtractionStrategy, DATASET_VARIABLE, DYNAMIC_PATH,
};
pub use model_config::{resolve_model_config, Injection, YamlConfigInfo};
pub use patterns::{extract_scalars, ScalarFields};
pub use script::{extract_training_info, ExtractedTrainingInfo, DEFAULT_ROOT_DIR};
