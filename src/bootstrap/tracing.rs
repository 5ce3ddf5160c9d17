//! Tracing configuration for the CareConnect shell
//!
//! ## Outputs
//!
//! - **stderr**: always, so stdout stays clean for command results
//! - **file**: `<data>/logs/careconnect.log` unless `[logging] to_file = false`
//! - **Sentry**: only when `SENTRY_DSN` is set
//!
//! `RUST_LOG` overrides the built-in directives entirely.

use std::{
    fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "careconnect.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Inputs for [`init_tracing_subscriber`].
#[derive(Debug, Clone, Default)]
pub struct TracingOptions {
    /// `--debug` on the command line.
    pub debug: bool,
    /// `[logging] level`; empty means "info".
    pub level: String,
    /// Directory for the log file, `None` to log to stderr only.
    pub logs_dir: Option<PathBuf>,
}

/// Build the default filter directives.
///
/// - **Debug**: debug level for everything, workspace crates included
/// - **Otherwise**: the configured level (default `info`) for the workspace
///   crates, with noisy HTTP internals used by Sentry kept at warn
fn build_filter_directives(debug: bool, level: &str) -> Vec<String> {
    let level = if debug {
        "debug"
    } else if level.trim().is_empty() {
        "info"
    } else {
        level.trim()
    };

    let mut directives = vec![level.to_string()];
    for krate in ["careconnect", "careconnect_lib", "cc_app", "cc_infra", "cc_core"] {
        directives.push(format!("{krate}={level}"));
    }
    directives.push("hyper=warn".to_string());
    directives.push("reqwest=warn".to_string());
    directives
}

/// Initialize the global tracing subscriber.
///
/// Call once from `main`, after configuration is resolved and before any
/// use case runs.
///
/// ## Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(options: &TracingOptions) -> anyhow::Result<()> {
    // Step 1: environment filter, overridable with RUST_LOG
    let filter_directives = build_filter_directives(options.debug, &options.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    // Step 2: Sentry, only if SENTRY_DSN is set. The guard must stay alive.
    let sentry_layer = if let Ok(dsn) = std::env::var("SENTRY_DSN") {
        let guard = sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                traces_sample_rate: 1.0,
                ..Default::default()
            },
        ));

        if SENTRY_GUARD.set(guard).is_err() {
            eprintln!("Sentry guard already initialized");
        }

        Some(sentry_tracing::layer())
    } else {
        None
    };

    // Step 3: writers
    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match options.logs_dir.as_deref().map(build_file_writer) {
        Some(Ok(writer)) => Some(writer),
        Some(Err(err)) => {
            eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
            None
        }
        None => None,
    };

    // Step 4: fmt layers
    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    // Step 5: register the global subscriber
    let subscriber = registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stderr_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
