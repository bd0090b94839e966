use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed label status: {0}")]
    Parse(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Parse(e.to_string())
    }
}
