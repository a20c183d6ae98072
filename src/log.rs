// src/log.rs
//
// Logging goes through `tracing`. The frontend calls `init()` once; library
// code uses the short macros below (or `tracing` directly).
//
// Two sinks:
// - stderr, filtered by RUST_LOG (default "info")
// - the debug log file, everything at DEBUG and above (best-effort)

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::consts::{DEBUG_LOG_FILE, DEFAULT_LOG_FILTER};

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        );

    let file_layer = open_debug_log(Path::new(DEBUG_LOG_FILE)).map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(EnvFilter::new("gym_reviews=debug"))
    });

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

fn open_debug_log(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok()?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
