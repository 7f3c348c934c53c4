use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Initialize tracing with a stdout layer and a daily-rolling file layer
///
/// The returned guard must stay alive for the lifetime of the process so
/// buffered log lines get flushed on shutdown.
pub fn init_logging(log_dir: impl AsRef<Path>, prefix: &str, level: &str) -> LoggerGuard {
    let directive: tracing_subscriber::filter::Directive = level.parse().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', defaulting to 'info'", level);
        "info".parse().unwrap()
    });
    let build_filter = |directive: tracing_subscriber::filter::Directive| {
        EnvFilter::builder()
            .with_default_directive(directive)
            .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default())
    };

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir.as_ref())
        .expect("Failed to create file appender");
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(build_filter(directive.clone()));
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(build_filter(directive));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    LoggerGuard(guard)
}
