//! Stage-conditioned resume path lookup
//!
//! Inspected scripts pick their checkpoint with
//! `if TRAINING_STAGE == 1: resume_path = '...' else: resume_path = '...'`.
//! Each branch gets its own scoped pattern so the literal from the other
//! branch is never picked up.

use super::patterns::first_capture;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Which branch of the stage conditional supplied the resume path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    ImageGen,
    TextInImage,
}

impl ResumeSource {
    /// Branch the script takes for a given stage value
    pub fn for_stage(stage: Option<i64>) -> Self {
        match stage {
            Some(1) => ResumeSource::ImageGen,
            _ => ResumeSource::TextInImage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResumeSource::ImageGen => "Stage 1 Logic (Image Gen)",
            ResumeSource::TextInImage => "Stage 2 Logic (Text-in-Image)",
        }
    }

    fn pattern(&self) -> &'static Regex {
        static STAGE_ONE_REGEX: OnceLock<Regex> = OnceLock::new();
        static ELSE_REGEX: OnceLock<Regex> = OnceLock::new();

        match self {
            ResumeSource::ImageGen => STAGE_ONE_REGEX.get_or_init(|| {
                Regex::new(r#"(?s)if TRAINING_STAGE == 1:.*?resume_path\s*=\s*['"](.*?)['"]"#)
                    .expect("valid regex")
            }),
            ResumeSource::TextInImage => ELSE_REGEX.get_or_init(|| {
                Regex::new(r#"(?s)else:\s*.*?resume_path\s*=\s*['"](.*?)['"]"#)
                    .expect("valid regex")
            }),
        }
    }
}

impl fmt::Display for ResumeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resume path chosen for the script's stage, with the branch it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResume {
    pub path: String,
    pub source: ResumeSource,
}

/// Finds the resume path literal inside the branch selected by `stage`
pub fn resolve_resume_path(content: &str, stage: Option<i64>) -> Option<ResolvedResume> {
    let source = ResumeSource::for_stage(stage);
    let resolved = first_capture(source.pattern(), content).map(|path| ResolvedResume {
        path,
        source,
    });

    match &resolved {
        Some(r) => debug!(branch = %source, path = %r.path, "Resume path resolved"),
        None => debug!(branch = %source, "No resume_path assignment in expected branch"),
    }
    resolved
}
