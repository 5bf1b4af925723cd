use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, colored_default_format};

/// Starts logging to stderr so stdout only carries the report.
/// `RUST_LOG` takes precedence over `default_spec`.
pub fn configure(default_spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(default_spec)?
        .log_to_stderr()
        .format_for_stderr(colored_default_format)
        .start()
}
