use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context(format!("Failed to create directory {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).context(format!("Failed to write file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_and_is_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("train.py"), "TRAINING_STAGE = 1\n").unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(!fs.is_file(temp.path()));
        assert!(fs.is_file(&temp.path().join("train.py")));
        assert!(!fs.exists(&temp.path().join("missing.py")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("cfg.yaml"), "model: {}\n").unwrap();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("cfg.yaml")).unwrap();
        assert_eq!(content, "model: {}\n");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();

        let err = fs
            .read_to_string(&temp.path().join("missing.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_create_dir_all_and_write() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let dir = temp.path().join("checkpoints/manual_logs");

        fs.create_dir_all(&dir).unwrap();
        fs.create_dir_all(&dir).unwrap();
        fs.write(&dir.join("report.txt"), "line one\nline two").unwrap();

        let written = std::fs::read_to_string(dir.join("report.txt")).unwrap();
        assert_eq!(written, "line one\nline two");
    }
}
