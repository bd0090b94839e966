//! Label Reader / Label Applier facade.
use std::{path::Path, sync::Arc, time::Duration};

use mip_model::{LabelId, LabelStatus, ReadMode, ReadOutcome};
use tracing::{debug, instrument, warn};

use crate::{
    backend::LabelBackend,
    error::{LabelError, LabelResult},
};

/// Successful label application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Wall-clock time from just before the tool was started until its status
    /// line was read. Includes process startup.
    pub elapsed: Duration,
}

impl Applied {
    /// Elapsed time in seconds (never negative).
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Entry point for reading and applying sensitivity labels.
///
/// Stateless apart from the backend handle: every call is a single one-shot
/// request to the backend and may be issued from any number of call sites.
#[derive(Clone)]
pub struct LabelApi {
    backend: Arc<dyn LabelBackend>,
}

impl LabelApi {
    pub fn new(backend: Arc<dyn LabelBackend>) -> Self {
        Self { backend }
    }

    /// Name of the backend this facade delegates to.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Read the classification of `path`.
    ///
    /// With [`ReadMode::Full`] the tool's whole status mapping is returned.
    /// Otherwise the label id is resolved (`SubLabelId` before `MainLabelId`);
    /// a document carrying neither yields [`LabelError::NotLabeled`].
    pub async fn read(&self, path: &Path, mode: ReadMode) -> LabelResult<ReadOutcome> {
        match mode {
            ReadMode::Full => self.read_status(path).await.map(ReadOutcome::Status),
            ReadMode::LabelId => self.read_label_id(path).await.map(ReadOutcome::LabelId),
        }
    }

    /// Read the full status mapping of `path`.
    #[instrument(level = "debug", skip(self, path), fields(backend = self.backend.name(), path = %path.display()))]
    pub async fn read_status(&self, path: &Path) -> LabelResult<LabelStatus> {
        let status = self.backend.query_status(path).await?;
        debug!(field_count = status.len(), "status received");
        Ok(status)
    }

    /// Read the label id to use when labeling other documents like `path`.
    pub async fn read_label_id(&self, path: &Path) -> LabelResult<LabelId> {
        let status = self.read_status(path).await?;
        let id = status.resolve().ok_or_else(|| LabelError::NotLabeled {
            path: path.to_path_buf(),
        })?;
        debug!(label_id = %id, "label id resolved");
        Ok(id)
    }

    /// Apply `label_id` to `path`.
    #[instrument(level = "debug", skip(self, path, label_id), fields(backend = self.backend.name(), path = %path.display(), label_id = %label_id))]
    pub async fn apply(&self, path: &Path, label_id: &LabelId) -> LabelResult<Applied> {
        match self.backend.apply_label(path, label_id).await {
            Ok(elapsed) => {
                debug!(elapsed_ms = elapsed.as_millis() as u64, "label applied");
                Ok(Applied { elapsed })
            }
            Err(e) => {
                if let Some(message) = e.raw_message() {
                    warn!(%message, "labeling tool refused the label");
                }
                Err(e)
            }
        }
    }

    /// Read the label of `source` and apply the same label to `target`.
    ///
    /// The read completes before the apply starts.
    pub async fn copy_label(&self, source: &Path, target: &Path) -> LabelResult<(LabelId, Applied)> {
        let id = self.read_label_id(source).await?;
        let applied = self.apply(target, &id).await?;
        Ok((id, applied))
    }
}
