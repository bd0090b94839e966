use std::path::PathBuf;

use mip_model::ModelError;
use thiserror::Error;

/// Everything that can abort a label read or apply.
///
/// None of these are retried; every variant aborts the current call.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tool output is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error(transparent)]
    Parse(#[from] ModelError),

    #[error("label apply failed: {message}")]
    ApplyFailed { message: String },

    #[error("no label id found for '{}'", .path.display())]
    NotLabeled { path: PathBuf },

    #[error("path is not valid UTF-8: '{}'", .path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LabelError {
    /// Returns `true` if the labeling tool refused the label.
    pub fn is_apply_failure(&self) -> bool {
        matches!(self, LabelError::ApplyFailed { .. })
    }

    /// Literal status text reported by the labeling tool, if this is an apply failure.
    pub fn raw_message(&self) -> Option<&str> {
        match self {
            LabelError::ApplyFailed { message } => Some(message),
            _ => None,
        }
    }
}

pub type LabelResult<T> = Result<T, LabelError>;
