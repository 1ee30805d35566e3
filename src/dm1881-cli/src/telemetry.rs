//! Tracing setup for the command line client
//!
//! - JSON formatted logs to a rolling file (daily or 10MB, whichever first)
//! - Human-readable output on stderr, stdout is kept for results

use anyhow::Result;
use rolling_file::{RollingConditionBasic, RollingFileAppender};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Debug mode also lets reqwest's
/// verbose connection events through.
fn default_directives(debug: bool) -> String {
    let level = if debug { "trace" } else { "info" };
    let mut directives =
        format!("dm1881={level},dm1881_cli={level},dm1881_rs={level},dm1881_core={level}");
    if debug {
        directives.push_str(",reqwest=trace");
    }
    directives
}

/// Initialize file and console logging
///
/// Returns a guard that must be kept alive to ensure logs are flushed
pub fn init_telemetry(log_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(
        log_dir.join("dm1881.log"),
        RollingConditionBasic::new()
            .daily()
            .max_size(10 * 1024 * 1024),
        9,
    )?;

    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_current_span(true)
        .with_target(true)
        .with_thread_ids(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    tracing::debug!("Telemetry initialized with file logging to {:?}", log_dir);

    Ok(guard)
}
