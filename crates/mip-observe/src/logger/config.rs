use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression (e.g., "warn", "mip_exec=trace,info").
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Color is used only when enabled in config and stderr (the log sink) is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
