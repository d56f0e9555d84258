// src/logging.rs
//! Logger setup for the command line tool.
//!
//! Diagnostics go through the `log` facade. When the debug log file exists
//! it is truncated and receives every record down to `trace`, one plain
//! message per line. Otherwise records go to stderr, filtered by `RUST_LOG`
//! (default `warn`), and no file is created.

use crate::error::{NvtError, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// True if diagnostics were requested by creating the debug log file
pub fn debug_log_requested(path: &Path) -> bool {
    path.is_file()
}

/// Build the logger for this run.
///
/// # Returns
///
/// The builder and whether it writes to the debug log file
pub fn builder(debug_log: &Path) -> Result<(Builder, bool)> {
    if debug_log_requested(debug_log) {
        let file = File::create(debug_log).map_err(|source| NvtError::OpenOutput {
            path: debug_log.to_path_buf(),
            source,
        })?;

        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Trace)
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .target(Target::Pipe(Box::new(file)));
        Ok((builder, true))
    } else {
        let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
        builder.target(Target::Stderr);
        Ok((builder, false))
    }
}

/// Install the global logger. Calling it a second time is a no-op.
pub fn init(debug_log: &Path) -> Result<bool> {
    let (mut builder, to_file) = builder(debug_log)?;
    // Another logger may already be installed (tests, embedding programs)
    let _ = builder.try_init();
    Ok(to_file)
}
