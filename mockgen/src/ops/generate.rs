//! Generate operation - mock generation from a model file.

use std::path::{Path, PathBuf};

use color_eyre::{Section, SectionExt};
use eyre::{Context, Result};
use mockgen_codegen::{DEFAULT_RUNTIME_IMPORT, GenerateOptions, Generator, Source, formatter_for};
use mockgen_core::{File, FileRules, Overwrite, WriteResult, mock_file_name};
use mockgen_model::{FormatterKind, GenerateSection, Package};

use crate::reports::{GenerateReport, GenerationResult};

/// Where the generated file goes.
#[derive(Debug, Clone, Copy)]
pub struct OutputTarget<'a> {
    /// Explicit output file from the command line.
    pub output: Option<&'a Path>,
    /// Directory for the default file name.
    pub output_dir: &'a Path,
}

/// Inputs for the generate operation.
///
/// Command-line values take precedence over the model's `[generate]`
/// table, which takes precedence over the defaults.
pub struct GenerateRequest<'a> {
    pub model_path: &'a Path,
    pub package: &'a Package,
    /// Interfaces selected with `--interfaces`, empty for all.
    pub selected: &'a [String],
    pub section: &'a GenerateSection,
    pub package_out: Option<&'a str>,
    pub self_package: Option<&'a str>,
    pub runtime: Option<&'a str>,
    pub formatter: FormatterKind,
    pub target: OutputTarget<'a>,
    pub overwrite: Overwrite,
    pub dry_run: bool,
}

impl GenerateRequest<'_> {
    /// Merge command-line values, `[generate]` settings and defaults.
    pub fn options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::for_package(self.package);
        if let Some(package_out) = self.package_out.or(self.section.package.as_deref()) {
            options = options.with_package_out(package_out);
        }
        if let Some(self_package) = self.self_package.or(self.section.self_package.as_deref()) {
            options = options.with_self_package(self_package);
        }
        let runtime = self
            .runtime
            .or(self.section.runtime.as_deref())
            .unwrap_or(DEFAULT_RUNTIME_IMPORT);
        options.with_runtime_import(runtime)
    }

    /// The header provenance for the generated file.
    pub fn source(&self) -> Source {
        if self.selected.is_empty() {
            return Source::File(self.model_path.display().to_string());
        }
        Source::Package {
            path: self
                .package
                .path
                .clone()
                .unwrap_or_else(|| self.package.name.clone()),
            interfaces: self.selected.to_vec(),
        }
    }

    /// Path of the generated file.
    ///
    /// Without an explicit output the name is derived from the model file
    /// stem, or from the selected interface names.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = self.target.output {
            return output.to_path_buf();
        }
        if let Some(output) = &self.section.output {
            return output.clone();
        }

        let stem = if self.selected.is_empty() {
            self.model_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.package.name.clone())
        } else {
            self.selected
                .iter()
                .map(|name| name.to_lowercase())
                .collect::<Vec<_>>()
                .join("_")
        };
        self.target.output_dir.join(mock_file_name(&stem))
    }
}

/// Execute the generate operation.
///
/// Renders and formats the mocks, then writes them unless this is a dry run.
pub fn generate(req: &GenerateRequest) -> Result<GenerateReport> {
    let generator = Generator::new(req.package, req.source(), req.options());
    let formatter = formatter_for(req.formatter);
    let path = req.output_path();

    tracing::info!(
        interfaces = req.package.interfaces.len(),
        formatter = formatter.name(),
        output = %path.display(),
        "generating mocks"
    );

    let content = match generator.generate(formatter.as_ref()) {
        Ok(content) => content,
        Err(e) => {
            let raw = e.source_text().map(str::to_string);
            let report = eyre::Report::new(e).wrap_err("Failed generating mock");
            return Err(match raw {
                Some(raw) => report.section(raw.header("Generated source:")),
                None => report,
            });
        }
    };

    let interfaces = req
        .package
        .interfaces
        .iter()
        .map(|iface| iface.name.clone())
        .collect();

    let result = if req.dry_run {
        GenerationResult::Preview {
            path,
            content: String::from_utf8_lossy(&content).into_owned(),
        }
    } else {
        let file = File::new(&path, content).with_rules(FileRules {
            overwrite: req.overwrite,
        });
        match file.write().wrap_err("Failed to write mock file")? {
            WriteResult::Written => GenerationResult::Written { path },
            WriteResult::Unchanged => GenerationResult::Unchanged { path },
            WriteResult::Skipped => GenerationResult::Skipped { path },
        }
    };

    Ok(GenerateReport { interfaces, result })
}
