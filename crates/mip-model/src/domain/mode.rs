use crate::{LabelId, LabelStatus};

/// What a status read should hand back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Only the resolved [`LabelId`] (default).
    #[default]
    LabelId,
    /// The whole status mapping as returned by the tool.
    Full,
}

/// `true` selects the full status mapping.
impl From<bool> for ReadMode {
    fn from(full: bool) -> Self {
        if full { Self::Full } else { Self::LabelId }
    }
}

/// Result of a status read, shaped by [`ReadMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Status(LabelStatus),
    LabelId(LabelId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_label_id() {
        assert_eq!(ReadMode::default(), ReadMode::LabelId);
    }

    #[test]
    fn from_bool_maps_full_result_toggle() {
        assert_eq!(ReadMode::from(true), ReadMode::Full);
        assert_eq!(ReadMode::from(false), ReadMode::LabelId);
    }
}
