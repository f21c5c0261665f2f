use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialise logging. The level is `info` unless `debug` is set, in which
/// case `RUST_LOG` may override it. With `log_file` the output goes to that
/// file instead of stderr.
///
/// Only the first call in a process installs a subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // Without debug we pin `info` so a stray `RUST_LOG` cannot flood the
    // console of a locked session.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let Some(path) = log_file else {
        let _ = builder.try_init();
        return;
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let Some(name) = path.file_name() else {
        let _ = builder.try_init();
        tracing::warn!(path = %path.display(), "log file has no name, logging to stderr");
        return;
    };

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    if builder
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok()
    {
        let _ = FILE_GUARD.set(guard);
    }
}
