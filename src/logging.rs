use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize file-backed logging. Stdout belongs to the TUI (and to the
/// CLI's own output), so log lines go to `taskdeck.log` under the platform
/// state directory. Returns the appender guard, which must stay alive for
/// the program's duration, or `None` if no writable directory exists.
///
/// Filtering is controlled by `TASKDECK_LOG` (env-filter syntax),
/// defaulting to `info`.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::never(&dir, "taskdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("TASKDECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::debug!(dir = %dir.display(), "logging initialized");
    Some(guard)
}

fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join("taskdeck"))
}
