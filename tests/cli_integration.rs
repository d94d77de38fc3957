//! CLI integration tests
//!
//! These tests run the compiled binary and verify:
//! - Argument parsing and help output
//! - Exit codes
//! - Report on stdout, snapshot file on disk
//! - Structured output formats

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn trainsnap_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_trainsnap"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(trainsnap_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("TRAINSNAP_SCRIPT")
        .env_remove("TRAINSNAP_DEFAULT_CONFIG")
        .env_remove("TRAINSNAP_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute trainsnap")
}

/// Helper to create a training setup with the default file layout
fn create_training_setup(dir: &TempDir) -> PathBuf {
    let root = dir.path().to_path_buf();

    fs::write(
        root.join("train.py"),
        r#"
TRAINING_STAGE = 2

if TRAINING_STAGE == 1:
    resume_path = './models/anytext_v2_init.ckpt'
else:
    resume_path = './checkpoints/stage1/last.ckpt'

root_dir = './runs'

if __name__ == '__main__':
    json_paths = [
        './data/wukong/data.json',
        './data/laion/data.json',
    ]
"#,
    )
    .expect("Failed to write train.py");

    fs::create_dir_all(root.join("models_yaml")).expect("Failed to create models_yaml");
    fs::write(
        root.join("models_yaml/anytext2_sd15.yaml"),
        "model:\n  params:\n    context_injection_config:\n      mode: concat\n      scale: 1.0\n",
    )
    .expect("Failed to write model config");

    root
}

fn snapshot_files(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn test_cli_help() {
    let output = Command::new(trainsnap_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute trainsnap");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("trainsnap"));
    assert!(stdout.contains("--script"));
    assert!(stdout.contains("--format"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(trainsnap_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute trainsnap");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_default_invocation_writes_snapshot() {
    let temp = TempDir::new().unwrap();
    let root = create_training_setup(&temp);

    let output = run_in(&root, &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("• Resume checkpoint     : ./checkpoints/stage1/last.ckpt"));
    assert!(stdout.contains("Stage 2 Logic (Text-in-Image)"));
    assert!(stdout.contains("• mode      : concat"));
    assert!(stdout.contains("• ./data/wukong/data.json"));

    let files = snapshot_files(&root.join("runs/manual_logs"));
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("config_check_"));
    assert!(name.ends_with("_Stage2.txt"));

    let written = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(written.trim_end(), stdout.trim_end());
}

#[test]
fn test_missing_script_exits_with_error() {
    let temp = TempDir::new().unwrap();

    let output = run_in(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Training script not found"));
    assert!(snapshot_files(&temp.path().join("checkpoints/manual_logs")).is_empty());
}

#[test]
fn test_working_dir_and_script_flags() {
    let temp = TempDir::new().unwrap();
    let root = create_training_setup(&temp);
    fs::rename(root.join("train.py"), root.join("train_v2.py")).unwrap();
    let elsewhere = TempDir::new().unwrap();

    let output = run_in(
        elsewhere.path(),
        &[
            "--working-dir",
            root.to_str().unwrap(),
            "--script",
            "train_v2.py",
        ],
    );

    assert!(output.status.success());
    assert_eq!(snapshot_files(&root.join("runs/manual_logs")).len(), 1);
}

#[test]
fn test_json_format() {
    let temp = TempDir::new().unwrap();
    let root = create_training_setup(&temp);

    let output = run_in(&root, &["--format", "json", "-q"]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["training"]["training_stage"], 2);
    assert_eq!(
        value["training"]["dataset_paths"],
        serde_json::json!(["./data/wukong/data.json", "./data/laion/data.json"])
    );
    assert_eq!(value["model_config"]["use_calligraphy"], false);
    assert_eq!(value["model_config"]["injection"]["kind"], "mapping");
    assert_eq!(value["config_path"], "./models_yaml/anytext2_sd15.yaml");
}

#[test]
fn test_invalid_format_rejected() {
    let output = Command::new(trainsnap_bin())
        .args(["--format", "xml"])
        .output()
        .expect("Failed to execute trainsnap");

    assert!(!output.status.success());
}

#[test]
fn test_report_not_printed_when_write_fails() {
    let temp = TempDir::new().unwrap();
    let root = create_training_setup(&temp);
    // root_dir './runs' exists as a plain file, so manual_logs cannot be created
    fs::write(root.join("runs"), "not a directory").unwrap();

    let output = run_in(&root, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to write snapshot"));
}

#[test]
fn test_log_level_from_environment() {
    let temp = TempDir::new().unwrap();
    let root = create_training_setup(&temp);

    let output = Command::new(trainsnap_bin())
        .current_dir(&root)
        .env_remove("TRAINSNAP_SCRIPT")
        .env_remove("TRAINSNAP_DEFAULT_CONFIG")
        .env_remove("RUST_LOG")
        .env("TRAINSNAP_LOG_LEVEL", "ERROR")
        .output()
        .expect("Failed to execute trainsnap");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Snapshot file generated"));

    let default_run = run_in(&root, &[]);
    let stderr = String::from_utf8_lossy(&default_run.stderr);
    assert!(stderr.contains("Snapshot file generated"));
}
