use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn log_dir() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join("cosmo").join("logs"))
}

/// File-only subscriber; the terminal belongs to the TUI.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_tracing(log_dir: &Path, debug: bool) -> Option<WorkerGuard> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        if debug {
            eprintln!(
                "Failed to create log directory {}: {e}. Logging disabled.",
                log_dir.display()
            );
        }
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, "cosmo.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(false)
        .with_ansi(false);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        return None;
    }

    Some(guard)
}
