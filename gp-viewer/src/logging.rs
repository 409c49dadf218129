//! This module handles logging for the viewer.
//!
//! Everything goes to a daily log file and to `stdout`. Bevy's render stack is very chatty at
//! `debug`, so the file layer quietens it with [`FILE_LOG_DIRECTIVES`] unless told otherwise with
//! `--file-log`.

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// The directory for the viewer's log files.
const LOG_DIR: &str = "logs";

/// The common prefix for the viewer's log files.
const LOG_PREFIX: &str = "gilded-pine.log";

/// The default filter directives for the log file, on top of a `debug` default.
///
/// `wgpu` and `naga` log every pipeline they compile, and the asset and render crates log every
/// frame at `debug`, which would bury the mode toggles.
pub const FILE_LOG_DIRECTIVES: &str =
    "wgpu=warn,naga=warn,bevy_render=info,bevy_asset=info,bevy_winit=info,winit=warn";

cfg_if::cfg_if! {
    if #[cfg(debug_assertions)] {
        /// The level to log to `stdout` at when `RUST_LOG` isn't set.
        const DEFAULT_STDOUT_LEVEL: LevelFilter = LevelFilter::DEBUG;
    } else {
        /// The level to log to `stdout` at when `RUST_LOG` isn't set.
        const DEFAULT_STDOUT_LEVEL: LevelFilter = LevelFilter::INFO;
    }
}

/// Build the filter for the log file from a comma-separated list of directives.
///
/// Invalid directives are skipped rather than aborting the viewer.
fn file_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .parse_lossy(directives)
}

/// Initialise a subscriber for tracing to log to `stdout` and a file, filtering the file with
/// `file_directives`.
///
/// The returned guard flushes the file logs when dropped, so keep it alive until the program
/// ends.
pub fn init_tracing(file_directives: &str) -> WorkerGuard {
    let (appender, guard) = non_blocking(rolling::daily(LOG_DIR, LOG_PREFIX));

    let subscriber = tracing_subscriber::registry()
        .with(
            Layer::new()
                .with_writer(appender)
                .with_ansi(false)
                .with_filter(file_filter(file_directives)),
        )
        .with(
            Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(DEFAULT_STDOUT_LEVEL.into())
                        .from_env_lossy(),
                ),
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");

    guard
}
