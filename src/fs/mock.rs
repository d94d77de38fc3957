use super::{FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory file system; relative paths live under the mock root
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();
        Self::ensure_parents(&mut files, &path);
    }

    /// Content of a file previously added or written, if any
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.normalize_path(path.as_ref());
        self.files
            .read()
            .unwrap()
            .get(&path)
            .and_then(|e| e.content.clone())
    }

    /// All file paths under `dir`, sorted
    pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = self.normalize_path(dir.as_ref());
        let mut found: Vec<PathBuf> = self
            .files
            .read()
            .unwrap()
            .iter()
            .filter(|(path, entry)| {
                entry.file_type == FileType::File && path.parent() == Some(dir.as_path())
            })
            .map(|(path, _)| path.clone())
            .collect();
        found.sort();
        found
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files.read().unwrap().contains_key(&path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.file_type == FileType::File)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        let mut files = self.files.write().unwrap();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if let Some(entry) = files.get(&current) {
                if entry.file_type == FileType::File {
                    return Err(anyhow!("Not a directory: {:?}", current));
                }
            }
        }

        Self::ensure_parents(&mut files, &path);
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);
        let mut files = self.files.write().unwrap();

        let parent_is_dir = path
            .parent()
            .and_then(|p| files.get(p))
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false);
        if !parent_is_dir {
            return Err(anyhow!("Parent directory missing for {:?}", path));
        }

        files.insert(
            path,
            MockEntry {
                content: Some(contents.to_string()),
                file_type: FileType::File,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("train.py", "TRAINING_STAGE = 2");

        assert!(fs.exists(Path::new("/mock/train.py")));
        assert!(fs.is_file(Path::new("/mock/train.py")));
        assert!(!fs.is_file(Path::new("/mock")));
    }

    #[test]
    fn test_read_to_string() {
        let fs = MockFileSystem::new();
        fs.add_file("cfg.yaml", "model: {}");

        let content = fs.read_to_string(Path::new("/mock/cfg.yaml")).unwrap();
        assert_eq!(content, "model: {}");
        assert!(fs.read_to_string(Path::new("/mock")).is_err());
        assert!(fs.read_to_string(Path::new("/mock/missing")).is_err());
    }

    #[test]
    fn test_with_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/work"));
        fs.add_file("models_yaml/base.yaml", "a: 1");

        assert!(fs.exists(Path::new("/work/models_yaml/base.yaml")));
        assert!(fs.exists(Path::new("/work/models_yaml")));
    }

    #[test]
    fn test_write_requires_parent_directory() {
        let fs = MockFileSystem::new();
        assert!(fs.write(Path::new("/out/logs/report.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/out/logs")).unwrap();
        fs.write(Path::new("/out/logs/report.txt"), "x").unwrap();
        assert_eq!(fs.content("/out/logs/report.txt").as_deref(), Some("x"));
        assert_eq!(
            fs.files_in("/out/logs"),
            vec![PathBuf::from("/out/logs/report.txt")]
        );
    }

    #[test]
    fn test_create_dir_all_through_file_fails() {
        let fs = MockFileSystem::new();
        fs.add_file("out", "not a directory");

        assert!(fs.create_dir_all(Path::new("/mock/out/manual_logs")).is_err());
    }
}
