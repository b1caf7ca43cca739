//! Logging system initialization
//!
//! Sets up the tracing subscriber from the `[logging]` configuration section.

use tracing_appender::rolling;

use crate::config::LoggingConfig;

/// Initialize logging based on configuration
///
/// Output goes to stdout unless `file` is set; with `enable_rotation` the
/// file rolls daily and keeps `max_backups` files. A log file that cannot be
/// opened falls back to stdout.
///
/// Should be called once during startup.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &LoggingConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, to_file) = make_writer(config);

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(!to_file);

    // try_init: a subscriber may already be installed (tests, embedding)
    if config.format == "json" {
        let _ = subscriber_builder.json().try_init();
    } else {
        let _ = subscriber_builder.try_init();
    }

    guard
}

fn make_writer(config: &LoggingConfig) -> (Box<dyn std::io::Write + Send + Sync>, bool) {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return (Box::new(std::io::stdout()), false);
    };

    let path = std::path::Path::new(log_file);
    if config.enable_rotation {
        let dir = path.parent().unwrap_or(std::path::Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("urlkeeper.log");
        match rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
        {
            Ok(appender) => return (Box::new(appender), true),
            Err(e) => eprintln!("[ERROR] Failed to create rolling log appender: {}", e),
        }
    } else {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => return (Box::new(file), true),
            Err(e) => eprintln!("[ERROR] Failed to open log file {}: {}", log_file, e),
        }
    }

    (Box::new(std::io::stdout()), false)
}
