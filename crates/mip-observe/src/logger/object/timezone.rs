use std::{fmt, str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::logger::error::LoggerError;

/// Local offset captured by [`init_local_offset`].
static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Timezone for log timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    #[default]
    Utc,
    Local,
}

impl LoggerTimeZone {
    /// Offset applied to timestamps. `Local` is UTC until [`init_local_offset`] ran.
    pub fn offset(&self) -> UtcOffset {
        match self {
            LoggerTimeZone::Utc => UtcOffset::UTC,
            LoggerTimeZone::Local => LOCAL_OFFSET.get().copied().unwrap_or(UtcOffset::UTC),
        }
    }
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// Captures the local UTC offset.
///
/// Must run before any other thread exists (on most Unix platforms the offset
/// cannot be read soundly afterwards). Falls back to UTC silently.
pub fn init_local_offset() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let _ = LOCAL_OFFSET.set(offset);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("UTC".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Utc);
        assert_eq!("local".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Local);
        assert!("pst".parse::<LoggerTimeZone>().is_err());
    }

    #[test]
    fn utc_offset_is_zero() {
        assert_eq!(LoggerTimeZone::Utc.offset(), UtcOffset::UTC);
    }

    #[test]
    fn local_offset_is_sane() {
        init_local_offset();
        assert!(LoggerTimeZone::Local.offset().whole_hours().abs() <= 14);
    }
}
