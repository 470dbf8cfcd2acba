use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "prop_analyzer=info";

fn env_filter(directive: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .with_context(|| format!("invalid log directive '{directive}'"))?,
    ))
}

/// Initialize tracing to stderr. `RUST_LOG` takes precedence over `directive`.
pub fn init(directive: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Initialize tracing into a file; used where stderr belongs to a terminal UI.
pub fn init_to_file(directive: &str, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive)?)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
