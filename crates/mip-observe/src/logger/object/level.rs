use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `tracing_subscriber::EnvFilter` expression.
///
/// Stores the raw string (e.g. `"warn"`, `"mip_exec=trace,info"`) so it can be
/// round-tripped through config files; the filter itself is built on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// # Examples
    /// ```
    /// use mip_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("mip_core=debug,warn").unwrap();
    /// assert_eq!(lvl.as_str(), "mip_core=debug,warn");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the filter; falls back to `warn` if the stored expression no longer parses.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("warn".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LoggerLevel(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}
