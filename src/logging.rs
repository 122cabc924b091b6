use crate::config::{ConfigError, ConfigErrorCode, LoggingConfig};
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "vfs-select.log";

static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

fn init_failed(message: impl Into<String>) -> ConfigError {
    ConfigError::new(ConfigErrorCode::LoggingInitFailed, message)
}

/// Installs the global `tracing` subscriber. `RUST_LOG` directives are
/// combined with `config.level`. A second call fails.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let directive: Directive = config.level.trim().parse().map_err(|err| {
        ConfigError::invalid_value(format!("Invalid log level '{}': {err}", config.level))
    })?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    match &config.log_dir {
        Some(log_dir) => {
            if GUARD.get().is_some() {
                return Err(init_failed("Logging is already initialized"));
            }
            std::fs::create_dir_all(log_dir).map_err(|err| {
                init_failed(format!("Failed to create log dir {}: {err}", log_dir.display()))
            })?;
            let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(config.ansi)
                .with_writer(non_blocking)
                .try_init()
                .map_err(|err| init_failed(format!("Failed to init tracing subscriber: {err}")))?;
            let _ = GUARD.set(guard);
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(config.ansi)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| init_failed(format!("Failed to init tracing subscriber: {err}")))?;
        }
    }

    tracing::debug!(
        "logging initialized: level={} log_dir={:?}",
        config.level,
        config.log_dir
    );
    Ok(())
}
