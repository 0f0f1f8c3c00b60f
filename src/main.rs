mod cli;
mod clipboard;
mod error;
mod logging;
mod renderer;
mod scanner;
mod selection;
mod session;
mod tree;
mod tui;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // The clipboard owner is a re-exec of this binary; it must not parse CLI args.
    if clipboard::serve_if_requested()? {
        return Ok(());
    }

    let cli_args = cli::Cli::parse();
    logging::init(cli_args.log_file.as_deref())?;

    workflow::run_foldertree(cli_args)
}
