use std::path::{Path, PathBuf};

use eyre::Result;

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content and was left untouched
    Unchanged,
    /// File already existed and was skipped
    Skipped,
}

impl WriteResult {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

/// A generated file waiting to be written
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    content: Vec<u8>,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: write if changed)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        match self.rules.overwrite {
            Overwrite::Always => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing if self.exists() => {
                tracing::debug!("{} exists, skipping", self.path.display());
                Ok(WriteResult::Skipped)
            }
            Overwrite::IfMissing => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfChanged => match std::fs::read(&self.path) {
                Ok(existing) if existing == self.content => {
                    tracing::debug!("{} is up to date", self.path.display());
                    Ok(WriteResult::Unchanged)
                }
                Ok(_) => {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite, even when the content is identical
    Always,
    /// Only write if the file doesn't exist
    IfMissing,
    /// Only touch the file when its content differs
    IfChanged,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::IfChanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("mock_foo_test.go");

        write_file(&path, b"package foo\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package foo\n");
    }

    #[test]
    fn test_if_changed_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock_store_test.go");

        let result = File::new(&path, "package store_test\n").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package store_test\n");
    }

    #[test]
    fn test_if_changed_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock_store_test.go");
        fs::write(&path, "same").unwrap();

        let result = File::new(&path, "same").write().unwrap();

        assert_eq!(result, WriteResult::Unchanged);
        assert!(!result.is_written());
    }

    #[test]
    fn test_if_changed_rewrites_different_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock_store_test.go");
        fs::write(&path, "old").unwrap();

        let result = File::new(&path, "new").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_always_rewrites_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock_store_test.go");
        fs::write(&path, "same").unwrap();

        let file = File::new(&path, "same").with_rules(FileRules {
            overwrite: Overwrite::Always,
        });

        assert_eq!(file.write().unwrap(), WriteResult::Written);
    }

    #[test]
    fn test_if_missing_skips_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock_store_test.go");
        fs::write(&path, "hand edited").unwrap();

        let file = File::new(&path, "generated").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
        });

        assert_eq!(file.write().unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.go");

        let file = File::new(&path, "content");
        assert!(!file.exists());

        fs::write(&path, "content").unwrap();
        assert!(file.exists());
    }
}
