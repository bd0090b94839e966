use mip_core::LabelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unknown output encoding: {0}")]
    UnknownEncoding(String),

    #[error("unsupported output encoding: {0} (must be ASCII-compatible)")]
    UnsupportedEncoding(&'static str),

    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),
}

impl From<ExecError> for LabelError {
    fn from(e: ExecError) -> Self {
        LabelError::InvalidConfig(e.to_string())
    }
}
