//! Subprocess backend for `mip_core::LabelBackend`.
//!
//! Runs the AIP cmdlets through an interpreter (Windows PowerShell by default)
//! via `tokio::process::Command`, one child process per call.
mod backend;
mod config;
mod output;

pub use backend::{SUCCESS_STATUS, SubprocessBackend};
pub use config::{
    DEFAULT_APPLY_TEMPLATE, DEFAULT_INTERPRETER, DEFAULT_QUERY_TEMPLATE, ShellConfig,
};

use std::sync::Arc;

use mip_core::LabelApi;

use crate::ExecError;

/// Build a [`LabelApi`] backed by the subprocess backend.
///
/// Fails if the configuration does not validate.
pub fn subprocess_api(config: ShellConfig) -> Result<LabelApi, ExecError> {
    let backend = SubprocessBackend::new(config)?;
    Ok(LabelApi::new(Arc::new(backend)))
}
