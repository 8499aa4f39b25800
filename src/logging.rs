use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ScrapingError};

const LOG_FILE: &str = "rscraping.log";

/// Wires a human-readable console layer and a daily-rolling JSON file under
/// `log_dir`. `RUST_LOG` still takes precedence over `directive`.
///
/// The returned guard owns the file writer's worker thread; the caller must
/// hold it for as long as records should reach the file.
pub fn init_logging(directive: &str, log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .map_err(|_| ScrapingError::InvalidInput(format!("invalid log directive {directive:?}")))?,
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .try_init()
        .map_err(|e| ScrapingError::InvalidInput(format!("unable to install logger: {e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_the_log_directory_and_hands_back_the_guard() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let _guard = init_logging("rscraping=debug", &logs).unwrap();
        assert!(logs.is_dir());
    }

    #[test]
    fn test_invalid_directive_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            init_logging("not a directive", dir.path()),
            Err(ScrapingError::InvalidInput(_))
        ));
    }
}
