use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    FILE_NAME, IS_LABELED, LabelId, MAIN_LABEL_ID, MAIN_LABEL_NAME, ModelError, ModelResult,
    SUB_LABEL_ID, SUB_LABEL_NAME,
};

/// Classification status of a single document, as reported by the query tool.
///
/// The full JSON object is kept verbatim so callers asking for the complete
/// result see every field the tool produced, not just the ones modeled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelStatus(Map<String, Value>);

impl LabelStatus {
    /// Create an empty status mapping.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parse the decoded tool output.
    ///
    /// Anything other than a single JSON object is rejected, including empty
    /// output (the tool prints nothing for some unlabeled files) and arrays
    /// (produced when the path matches several files).
    pub fn from_json(text: &str) -> ModelResult<Self> {
        if text.trim().is_empty() {
            return Err(ModelError::Parse("empty output".into()));
        }
        let status: LabelStatus = serde_json::from_str(text)?;
        Ok(status)
    }

    /// Resolve the label id to use when applying this label elsewhere.
    ///
    /// `SubLabelId` wins when non-empty, otherwise `MainLabelId`.
    /// Returns `None` when neither carries a value.
    pub fn resolve(&self) -> Option<LabelId> {
        self.sub_label_id()
            .or_else(|| self.main_label_id())
            .map(LabelId::new)
    }

    pub fn main_label_id(&self) -> Option<&str> {
        self.non_empty_str(MAIN_LABEL_ID)
    }

    pub fn sub_label_id(&self) -> Option<&str> {
        self.non_empty_str(SUB_LABEL_ID)
    }

    pub fn main_label_name(&self) -> Option<&str> {
        self.non_empty_str(MAIN_LABEL_NAME)
    }

    pub fn sub_label_name(&self) -> Option<&str> {
        self.non_empty_str(SUB_LABEL_NAME)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.non_empty_str(FILE_NAME)
    }

    /// `IsLabeled` as reported by the tool, if present.
    pub fn is_labeled(&self) -> Option<bool> {
        self.0.get(IS_LABELED).and_then(Value::as_bool)
    }

    /// Get a raw field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or overwrite a raw field.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the mapping as indented JSON.
    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl From<Map<String, Value>> for LabelStatus {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
