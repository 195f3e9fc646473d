use tracing_appender::non_blocking::WorkerGuard;

use crate::state::logs_dir;

/// Initialize file-based logging.
///
/// Logs go to `~/.taskdeck/logs/taskdeck.log` (never stdout, since ratatui
/// owns the terminal while the board is open). Returns a [`WorkerGuard`]
/// that must be held until shutdown so buffered entries are flushed.
pub fn init_logging(level: &str) -> Option<WorkerGuard> {
    let log_dir = logs_dir().ok()?;

    let file_appender = tracing_appender::rolling::never(log_dir, "taskdeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
