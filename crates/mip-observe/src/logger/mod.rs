mod config;
mod error;
mod init;
mod object;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, init_local_offset};

/// Installs the global tracing subscriber described by `cfg`.
///
/// Text and JSON output go to stderr; stdout is left to the program's own results.
///
/// For [`LoggerTimeZone::Local`], call [`init_local_offset`] first, before any
/// threads are spawned.
///
/// # Examples
/// ```rust
/// use mip_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::warn!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg),
        LoggerFormat::Json => init::logger_json(cfg),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
