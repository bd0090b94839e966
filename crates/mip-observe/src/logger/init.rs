use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::logger::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    object::LoggerRfc3339,
};

/// Initializes text logger on stderr.
pub(crate) fn logger_text(cfg: &LoggerConfig) -> LoggerResult<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(LoggerRfc3339::new(cfg.tz));

    let subscriber = tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(fmt_layer);
    init_subscriber(subscriber)
}

/// Initializes JSON logger on stderr.
pub(crate) fn logger_json(cfg: &LoggerConfig) -> LoggerResult<()> {
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(LoggerRfc3339::new(cfg.tz));

    let subscriber = tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(fmt_layer);
    init_subscriber(subscriber)
}

#[cfg(target_os = "linux")]
pub(crate) fn logger_journald(cfg: &LoggerConfig) -> LoggerResult<()> {
    let journald =
        tracing_journald::layer().map_err(|e| LoggerError::JournaldInitFailed(e.to_string()))?;

    let subscriber = tracing_subscriber::registry()
        .with(cfg.level.to_env_filter())
        .with(journald);
    init_subscriber(subscriber)
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn logger_journald(_cfg: &LoggerConfig) -> LoggerResult<()> {
    Err(LoggerError::JournaldNotSupported)
}

fn init_subscriber<S>(subscriber: S) -> LoggerResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::object::LoggerFormat;

    // Only one global subscriber per test binary, so both outcomes are checked here.
    #[test]
    fn second_init_reports_already_initialized() {
        let cfg = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        assert!(logger_text(&cfg).is_ok());

        let json = LoggerConfig {
            format: LoggerFormat::Json,
            ..cfg
        };
        assert!(matches!(
            logger_json(&json),
            Err(LoggerError::AlreadyInitialized)
        ));
    }

    #[test]
    #[cfg(not(target_os = "linux"))]
    fn journald_is_linux_only() {
        let result = logger_journald(&LoggerConfig::default());
        assert!(matches!(result, Err(LoggerError::JournaldNotSupported)));
    }
}
