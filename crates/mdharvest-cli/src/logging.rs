use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: compact records on stderr, plus a plain-text copy in
/// `log_file` when one is given. The log file is appended to, so repeated runs accumulate.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_for(verbosity, quiet))
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(true);
            subscriber.with(file_layer).init();
        }
        None => subscriber.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use std::fs::File;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    #[test]
    fn verbosity_maps_to_level_filters() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(3, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn global_logger_accepts_every_macro() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });

        error!(id = "1ABC", "error record");
        warn!("warning record");
        info!(mentions = 2, "info record");
        debug!("debug record");
        trace!("trace record");
    }

    #[test]
    #[serial]
    fn file_layer_writes_plain_records_with_thread_ids() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("mdharvest.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!(id = "1QLX", "Resolving mention.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Resolving mention."));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn unopenable_log_file_propagates_io_error() {
        let invalid_path = Path::new("/");
        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
