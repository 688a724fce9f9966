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
pub struct ExplainCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let stack = StackToml::open(&self.config).unwrap_or_exit().into_stack();

        ops::explain(stack, &self.config)
            .unwrap_or_exit()
            .render(&mut TerminalOutput);

        Ok(())
    }
}
