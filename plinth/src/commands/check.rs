use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plinth_stack::StackToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let stack = StackToml::open(&self.config).unwrap_or_exit().into_stack();

        let report = ops::check(stack, &self.config);
        report.render(&mut TerminalOutput);

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
