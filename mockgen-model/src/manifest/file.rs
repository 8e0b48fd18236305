use std::path::{Path, PathBuf};

use super::{GenerateSection, Model, parse_str_with_filename};
use crate::{Package, Result};

/// A model file on disk with both raw content and the validated model.
#[derive(Debug)]
pub struct MockToml {
    path: PathBuf,
    content: String,
    model: Model,
}

impl MockToml {
    /// Open and parse a model file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let model = parse_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            model,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the interface package.
    pub fn package(&self) -> &Package {
        &self.model.package
    }

    /// Get the `[generate]` defaults.
    pub fn generate(&self) -> &GenerateSection {
        &self.model.generate
    }

    /// Consume the file and return the model.
    pub fn into_model(self) -> Model {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    #[test]
    fn test_open_reads_and_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mockgen.toml");
        std::fs::write(
            &path,
            r#"
            [package]
            name = "store"

            [[interfaces]]
            name = "Store"
            "#,
        )
        .unwrap();

        let file = MockToml::open(&path).unwrap();
        assert_eq!(file.path(), path);
        assert!(file.content().contains("[package]"));
        assert_eq!(file.package().interface_names(), vec!["Store"]);
        assert!(file.generate().package.is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = MockToml::open(temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
