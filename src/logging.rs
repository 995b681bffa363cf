//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so events go to a log file. Filter
//! priority, highest first:
//!
//! 1. `POKEDEX_LOG`
//! 2. `RUST_LOG`
//! 3. `--verbose` (debug for this crate, warn elsewhere)
//! 4. `warn`

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "POKEDEX_LOG";

pub fn init(log_file: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(fmt_layer)
        .try_init()
        .map_err(|err| io::Error::other(format!("failed to install log subscriber: {err}")))
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Some(filter) = std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directive(verbose))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,pokedex=debug"
    } else {
        "warn"
    }
}
