mod commands;
mod logging;
mod ops;
mod reports;
mod templates;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_tracing(cli.verbosity());
    cli.run()
}
