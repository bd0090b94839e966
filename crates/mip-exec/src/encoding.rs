use std::{borrow::Cow, fmt, str::FromStr};

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::ExecError;

/// Character encoding used to decode the labeling tool's stdout.
///
/// Accepts any WHATWG encoding label (`"iso8859-15"`, `"l9"`, `"utf-8"`,
/// `"windows-1252"`, ...) plus the Python codec spellings of ISO-8859-15
/// (`"latin9"`, `"latin-9"`, `"iso8859_15"`). Only ASCII-compatible encodings
/// are allowed since output is split on `\n` bytes before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct OutputEncoding(&'static Encoding);

impl OutputEncoding {
    /// Resolve an encoding from its label.
    pub fn new(label: &str) -> Result<Self, ExecError> {
        let encoding = python_alias(label)
            .or_else(|| Encoding::for_label(label.trim().as_bytes()))
            .ok_or_else(|| ExecError::UnknownEncoding(label.to_string()))?;
        if !encoding.is_ascii_compatible() {
            return Err(ExecError::UnsupportedEncoding(encoding.name()));
        }
        Ok(Self(encoding))
    }

    /// Canonical encoding name (e.g. `"ISO-8859-15"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decode `bytes` strictly.
    ///
    /// Returns `None` on malformed input instead of substituting replacement
    /// characters.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
    }
}

/// Python codec names for ISO-8859-15 that WHATWG does not list.
fn python_alias(label: &str) -> Option<&'static Encoding> {
    let norm = label.trim().to_ascii_lowercase().replace('_', "-");
    match norm.as_str() {
        "latin9" | "latin-9" | "iso8859-15" | "iso-8859-15" => Some(encoding_rs::ISO_8859_15),
        _ => None,
    }
}

/// ISO-8859-15, the code page Windows PowerShell emits for Western locales.
impl Default for OutputEncoding {
    fn default() -> Self {
        Self(encoding_rs::ISO_8859_15)
    }
}

impl FromStr for OutputEncoding {
    type Err = ExecError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OutputEncoding {
    type Error = ExecError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<OutputEncoding> for String {
    fn from(e: OutputEncoding) -> Self {
        e.name().to_string()
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_latin9() {
        assert_eq!(OutputEncoding::default().name(), "ISO-8859-15");
    }

    #[test]
    fn accepts_common_labels() {
        for (label, name) in [
            ("iso8859-15", "ISO-8859-15"),
            ("ISO-8859-15", "ISO-8859-15"),
            ("latin9", "ISO-8859-15"),
            ("Latin-9", "ISO-8859-15"),
            ("iso8859_15", "ISO-8859-15"),
            ("l9", "ISO-8859-15"),
            ("utf-8", "UTF-8"),
            (" utf8 ", "UTF-8"),
            ("cp1252", "windows-1252"),
        ] {
            let enc: OutputEncoding = label.parse().unwrap();
            assert_eq!(enc.name(), name, "label {label:?}");
        }
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "klingon".parse::<OutputEncoding>().unwrap_err();
        assert!(matches!(err, ExecError::UnknownEncoding(_)));
    }

    #[test]
    fn rejects_utf16() {
        let err = "utf-16le".parse::<OutputEncoding>().unwrap_err();
        assert!(matches!(err, ExecError::UnsupportedEncoding("UTF-16LE")));
    }

    #[test]
    fn latin9_decodes_euro_sign() {
        let enc = OutputEncoding::default();
        assert_eq!(enc.decode(b"\xa4 100").as_deref(), Some("€ 100"));
    }

    #[test]
    fn strict_utf8_rejects_malformed_bytes() {
        let enc: OutputEncoding = "utf-8".parse().unwrap();
        assert!(enc.decode(b"ok\xff").is_none());
        assert_eq!(enc.decode("Café".as_bytes()).as_deref(), Some("Café"));
    }

    #[test]
    fn serde_uses_canonical_name() {
        let enc: OutputEncoding = serde_json::from_str(r#""latin9""#).unwrap();
        assert_eq!(serde_json::to_string(&enc).unwrap(), r#""ISO-8859-15""#);
        assert!(serde_json::from_str::<OutputEncoding>(r#""nope""#).is_err());
    }
}
