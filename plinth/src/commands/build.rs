use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plinth_stack::StackToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, OutputFormat},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,

    /// Manifest format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let stack = StackToml::open(&self.config).unwrap_or_exit().into_stack();

        let report = ops::build(stack, self.format, self.output.as_deref()).unwrap_or_exit();
        report.render(&mut TerminalOutput);

        Ok(())
    }
}
