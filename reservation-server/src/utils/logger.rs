//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level is used as the
//! filter directive. With a log directory the output goes to a daily file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "reservation_server=info,tower_http=info";

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or(DEFAULT_DIRECTIVE)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "reservation-server");
            let _ = subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init();
            return;
        }
        eprintln!("Log directory '{}' does not exist, logging to stdout", dir);
    }

    let _ = subscriber.try_init();
}
