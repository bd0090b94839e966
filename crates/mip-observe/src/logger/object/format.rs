use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::logger::LoggerError;

/// Output format for the logger.
/// - `Text`     — human-friendly text on stderr.
/// - `Json`     — one JSON object per event on stderr.
/// - `Journald` — systemd-journald (Linux only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub enum LoggerFormat {
    #[default]
    Text,
    Json,
    Journald,
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "journald" | "journal" => {
                if cfg!(target_os = "linux") {
                    Ok(Self::Journald)
                } else {
                    Err(LoggerError::JournaldNotSupported)
                }
            }
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for LoggerFormat {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LoggerFormat> for String {
    fn from(f: LoggerFormat) -> Self {
        f.to_string()
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        };
        f.write_str(s)
    }
}
