mod check;
mod completions;
mod generate;

use std::io;

use check::CheckCommand;
use clap::{Parser, Subcommand, ValueEnum};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on model errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mockgen_model::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Log level for diagnostic output on stderr.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser)]
#[command(name = "mockgen")]
#[command(version)]
#[command(about = "Generate Go mocks and call verifiers from interface models")]
pub(crate) struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Install the tracing subscriber writing to stderr.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.to_tracing_level().to_string()));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mocks for the interfaces in a model file
    Generate(GenerateCommand),

    /// Validate a model file without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use mockgen_core::Overwrite;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "mockgen",
            "--log-level",
            "debug",
            "generate",
            "store.toml",
            "--interfaces",
            "Store,Cache",
            "--gofmt",
            "--dry-run",
        ])
        .unwrap();
        assert!(matches!(cli.log_level, LogLevel::Debug));
        match cli.command {
            Commands::Generate(cmd) => {
                assert_eq!(cmd.interfaces, vec!["Store", "Cache"]);
                assert!(cmd.gofmt);
                assert!(cmd.dry_run);
            }
            _ => panic!("expected generate command"),
        }
    }

    fn parse_generate(args: &[&str]) -> GenerateCommand {
        let argv = ["mockgen", "generate", "store.toml"]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Generate(cmd) => cmd,
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_repeated_interfaces_selected_once() {
        let cmd = parse_generate(&["--interfaces", "Store,Cache,Store"]);
        assert_eq!(cmd.selected_interfaces(), vec!["Store", "Cache"]);
    }

    #[test]
    fn test_overwrite_flags() {
        assert_eq!(parse_generate(&[]).overwrite(), Overwrite::IfChanged);
        assert_eq!(parse_generate(&["--force"]).overwrite(), Overwrite::Always);
        assert_eq!(
            parse_generate(&["--skip-existing"]).overwrite(),
            Overwrite::IfMissing
        );
        assert!(
            Cli::try_parse_from(["mockgen", "generate", "m.toml", "--force", "--skip-existing"])
                .is_err()
        );
    }
}
