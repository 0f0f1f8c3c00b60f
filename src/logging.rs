use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when writing to a log file.
const FILE_DIRECTIVE: &str = "foldertree=debug";
/// Default filter on stderr; the TUI owns the screen, so keep it quiet.
const STDERR_DIRECTIVE: &str = "warn";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Subscriber writing plain-text events to `log_file`.
pub fn file_subscriber(log_file: File, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .with(filter)
}

/// Install the global subscriber. `RUST_LOG` overrides the defaults.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            file_subscriber(file, env_filter(FILE_DIRECTIVE)).try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(env_filter(STDERR_DIRECTIVE))
                .try_init()?;
        }
    }
    Ok(())
}
