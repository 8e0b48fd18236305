//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from mock generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Interfaces that received a mock, in declaration order.
    pub interfaces: Vec<String>,
    /// What happened to the output file.
    pub result: GenerationResult,
}

/// Outcome for the generated file.
#[derive(Debug)]
pub enum GenerationResult {
    /// File was written to disk.
    Written { path: PathBuf },
    /// File already had the generated content.
    Unchanged { path: PathBuf },
    /// File existed and was left alone.
    Skipped { path: PathBuf },
    /// Dry-run preview.
    Preview { path: PathBuf, content: String },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Preview { path, content } => {
                out.divider(&path.display().to_string());
                out.preformatted(content);
                out.divider("Summary");
                out.preformatted(&format!(
                    "{} would be generated with {} mock{}",
                    path.display(),
                    self.interfaces.len(),
                    if self.interfaces.len() == 1 { "" } else { "s" }
                ));
            }
            GenerationResult::Written { path } => {
                self.render_mocks(out);
                out.key_value("Generated", &path.display().to_string());
            }
            GenerationResult::Unchanged { path } => {
                self.render_mocks(out);
                out.key_value("Up to date", &path.display().to_string());
            }
            GenerationResult::Skipped { path } => {
                out.warning(&format!("{} already exists, not overwritten", path.display()));
            }
        }
    }
}

impl GenerateReport {
    fn render_mocks(&self, out: &mut dyn Output) {
        out.section(&format!("Mocks ({})", self.interfaces.len()));
        for name in &self.interfaces {
            out.added_item(name);
        }
        out.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_written_report() {
        let report = GenerateReport {
            interfaces: vec!["Store".to_string(), "Cache".to_string()],
            result: GenerationResult::Written {
                path: PathBuf::from("mock_store_test.go"),
            },
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "Mocks (2):",
                "  + Store",
                "  + Cache",
                "",
                "Generated: mock_store_test.go",
            ]
        );
    }

    #[test]
    fn test_skipped_report() {
        let report = GenerateReport {
            interfaces: vec!["Store".to_string()],
            result: GenerationResult::Skipped {
                path: PathBuf::from("mock_store_test.go"),
            },
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec!["warning: mock_store_test.go already exists, not overwritten"]
        );
    }

    #[test]
    fn test_preview_report() {
        let report = GenerateReport {
            interfaces: vec!["Store".to_string()],
            result: GenerationResult::Preview {
                path: PathBuf::from("mock_store_test.go"),
                content: "package store_test\n".to_string(),
            },
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines[0], "── mock_store_test.go ──");
        assert_eq!(
            out.lines.last().unwrap(),
            "mock_store_test.go would be generated with 1 mock"
        );
    }
}
