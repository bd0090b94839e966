use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque classification label identifier.
///
/// Usually a GUID issued by the information-protection service, but no format
/// validation is applied: the value is passed to the labeling tool verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(String);

impl LabelId {
    /// Create a label id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LabelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for LabelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LabelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
