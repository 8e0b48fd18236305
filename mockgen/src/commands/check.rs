use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use mockgen_model::MockToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the model file
    pub model: PathBuf,

    /// Print the validated model as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let mock_toml = MockToml::open(&self.model).unwrap_or_exit();

        if self.json {
            let json = serde_json::to_string_pretty(mock_toml.package())
                .wrap_err("Failed to serialize model")?;
            println!("{}", json);
            return Ok(());
        }

        let report = ops::check(&mock_toml);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
