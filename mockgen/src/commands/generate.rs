use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use mockgen_core::Overwrite;
use mockgen_model::{FormatterKind, MockToml};

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateRequest, OutputTarget},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the model file
    pub model: PathBuf,

    /// Only mock these interfaces (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub interfaces: Vec<String>,

    /// Package name for the generated file (defaults to `<package>_test`)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Import path of the package the mocks are generated into
    #[arg(long)]
    pub self_package: Option<String>,

    /// Import path of the mock runtime
    #[arg(long)]
    pub runtime: Option<String>,

    /// Output file (defaults to `mock_<name>_test.go` in the output directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'd', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Format with the external gofmt binary instead of the built-in formatter
    #[arg(long)]
    pub gofmt: bool,

    /// Rewrite the output file even if its content is unchanged
    #[arg(long)]
    pub force: bool,

    /// Leave an existing output file untouched
    #[arg(long, conflicts_with = "force")]
    pub skip_existing: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Print the parsed model and exit
    #[arg(long)]
    pub debug_model: bool,
}

impl GenerateCommand {
    /// Requested interfaces in order, each named once.
    pub fn selected_interfaces(&self) -> Vec<String> {
        let mut selected: Vec<String> = Vec::with_capacity(self.interfaces.len());
        for name in &self.interfaces {
            if !selected.contains(name) {
                selected.push(name.clone());
            }
        }
        selected
    }

    /// How an existing output file is treated.
    pub fn overwrite(&self) -> Overwrite {
        if self.force {
            Overwrite::Always
        } else if self.skip_existing {
            Overwrite::IfMissing
        } else {
            Overwrite::IfChanged
        }
    }

    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let mock_toml = MockToml::open(&self.model).unwrap_or_exit();
        let section = mock_toml.generate().clone();
        let mut package = mock_toml.into_model().package;

        let selected = self.selected_interfaces();
        if !selected.is_empty() {
            package = package.select_interfaces(&selected).unwrap_or_exit();
        }

        if self.debug_model {
            package
                .print(&mut std::io::stdout())
                .wrap_err("Failed to print model")?;
            return Ok(());
        }

        let formatter = if self.gofmt {
            FormatterKind::Gofmt
        } else {
            section.formatter.unwrap_or_default()
        };
        let request = GenerateRequest {
            model_path: &self.model,
            package: &package,
            selected: &selected,
            section: &section,
            package_out: self.package.as_deref(),
            self_package: self.self_package.as_deref(),
            runtime: self.runtime.as_deref(),
            formatter,
            target: OutputTarget {
                output: self.output.as_deref(),
                output_dir: &self.output_dir,
            },
            overwrite: self.overwrite(),
            dry_run: self.dry_run,
        };

        let report = ops::generate(&request)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
