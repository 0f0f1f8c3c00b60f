use crate::scanner::ScanOptions;
use clap::Parser;
use std::path::PathBuf;

/// foldertree – pick files and folders, get a tree diagram of the selection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to load (defaults to CWD)
    #[arg(value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Skip files ignored by .gitignore
    #[arg(long)]
    pub respect_gitignore: bool,

    /// Print the diagram of the whole directory and exit without the TUI.
    #[arg(long)]
    pub headless: bool,

    /// Print the confirmed diagram to stdout instead of copying it to the clipboard.
    #[arg(long)]
    pub dry_run: bool,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            respect_gitignore: self.respect_gitignore,
        }
    }
}
