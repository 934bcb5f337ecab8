use std::fs;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Install the global tracing subscriber: console output plus a daily-rolled
/// log file under the user log directory. Safe to call repeatedly.
pub fn init_logging() {
    let _ = INIT.get_or_init(|| {
        let log_dir = directories::ProjectDirs::from("io", "forgeloader", "forgeloader")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"));
        let _ = fs::create_dir_all(&log_dir);

        let appender = rolling::daily(&log_dir, "forgeloader.log");
        let (file_writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard); // dropped writes are lost without the guard

        let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(env)
            .with(fmt::layer().with_target(false))
            .with(fmt::layer().with_writer(file_writer).with_target(false))
            .init();
    });
}


