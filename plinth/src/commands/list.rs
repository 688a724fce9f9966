use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use plinth_stack::StackToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, ListStyle},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,

    /// How to draw the apply order
    #[arg(short, long, value_enum, default_value_t = ListStyle::Deps)]
    pub style: ListStyle,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let stack = StackToml::open(&self.config).unwrap_or_exit().into_stack();

        ops::list(stack, self.style)
            .unwrap_or_exit()
            .render(&mut TerminalOutput);

        Ok(())
    }
}
