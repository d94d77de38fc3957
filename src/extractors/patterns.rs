//! Scalar assignments pulled from the raw script text

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Scalar fields found by the text patterns; each is `None` when its pattern misses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarFields {
    pub training_stage: Option<i64>,
    pub config_path: Option<String>,
    pub root_dir: Option<String>,
}

fn stage_regex() -> &'static Regex {
    static STAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    STAGE_REGEX.get_or_init(|| Regex::new(r"(?m)^TRAINING_STAGE\s*=\s*(\d+)").expect("valid regex"))
}

fn config_path_regex() -> &'static Regex {
    static CONFIG_PATH_REGEX: OnceLock<Regex> = OnceLock::new();
    CONFIG_PATH_REGEX
        .get_or_init(|| Regex::new(r#"config_path\s*=\s*['"](.*?)['"]"#).expect("valid regex"))
}

fn root_dir_regex() -> &'static Regex {
    static ROOT_DIR_REGEX: OnceLock<Regex> = OnceLock::new();
    ROOT_DIR_REGEX
        .get_or_init(|| Regex::new(r#"root_dir\s*=\s*['"](.*?)['"]"#).expect("valid regex"))
}

/// Runs every scalar pattern independently against `content`
pub fn extract_scalars(content: &str) -> ScalarFields {
    let fields = ScalarFields {
        training_stage: extract_stage(content),
        config_path: first_capture(config_path_regex(), content),
        root_dir: first_capture(root_dir_regex(), content),
    };
    debug!(?fields, "Scalar patterns evaluated");
    fields
}

fn extract_stage(content: &str) -> Option<i64> {
    let digits = first_capture(stage_regex(), content)?;
    match digits.parse::<i64>() {
        Ok(stage) => Some(stage),
        Err(e) => {
            debug!(value = %digits, error = %e, "TRAINING_STAGE literal out of range");
            None
        }
    }
}

pub(crate) fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}
