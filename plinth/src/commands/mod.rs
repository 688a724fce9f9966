mod build;
mod check;
mod completions;
mod explain;
mod init;
mod list;

use build::BuildCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use init::InitCommand;
use list::ListCommand;
use plinth_graph::pipeline::BuildFailure;

/// Extension trait for exiting on stack and build errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for plinth_stack::Result<T> {
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

impl<T> UnwrapOrExit<T> for std::result::Result<T, BuildFailure> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(failure) => {
                for diag in failure.diagnostics.iter().filter(|d| d.severity.is_error()) {
                    eprintln!("error: {}", diag.message);
                    if let Some(loc) = &diag.location {
                        eprintln!("  --> {}", loc);
                    }
                }
                eprintln!("{}", crate::ops::describe_failure(failure.error));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "plinth")]
#[command(version)]
#[command(about = "Build ordered resource manifests from stack.toml files")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); PLINTH_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Build(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter stack.toml
    Init(InitCommand),

    /// Validate stack.toml without emitting a manifest
    Check(CheckCommand),

    /// Build the ordered manifest from stack.toml
    Build(BuildCommand),

    /// List resources in apply order
    List(ListCommand),

    /// Show the build phases, lints and resolved order
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_counts_flags() {
        let cli = Cli::try_parse_from(["plinth", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbosity(), 2);

        let cli = Cli::try_parse_from(["plinth", "list", "-v"]).unwrap();
        assert_eq!(cli.verbosity(), 1);
    }

    #[test]
    fn test_build_format_flag() {
        let cli = Cli::try_parse_from(["plinth", "build", "-f", "toml", "-o", "out.toml"]).unwrap();
        match cli.command {
            Commands::Build(cmd) => {
                assert_eq!(cmd.format, crate::ops::OutputFormat::Toml);
                assert_eq!(cmd.output.as_deref(), Some(std::path::Path::new("out.toml")));
            }
            _ => panic!("expected build command"),
        }
    }
}
