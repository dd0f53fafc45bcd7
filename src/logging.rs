use std::io;
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Sets up tracing output. Stdout honors `RUST_LOG` and defaults to
/// `info`; when a log directory is given, a daily rolling file captures
/// debug-level detail as well.
pub fn configure_logging(log_dir: Option<&Path>) {
    let stdout_log = fmt::layer().with_writer(io::stdout).with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let file_log = log_dir.map(|dir| {
        let file_appender = rolling::daily(dir, "vigil.log");
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_filter(EnvFilter::new("debug"))
    });

    tracing_subscriber::Registry::default()
        .with(stdout_log)
        .with(file_log)
        .init();
}
