//! Collaborator interface used by [`LabelApi`](crate::LabelApi) to reach the
//! information-protection tooling.
//!
//! Concrete backends (e.g. the subprocess backend in `mip-exec`) implement this
//! trait; the facade only ever talks to it through `Arc<dyn LabelBackend>`.
use std::{path::Path, time::Duration};

use async_trait::async_trait;
use mip_model::{LabelId, LabelStatus};

use crate::error::LabelResult;

/// Narrow interface over the external labeling tool.
///
/// A backend is responsible for:
/// - reporting the classification status of a document (`query_status`)
/// - applying a label to a document and timing the operation (`apply_label`)
///
/// Implementations perform exactly one tool invocation per call, with no retry
/// and no timeout.
#[async_trait]
pub trait LabelBackend: Send + Sync {
    /// Backend name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Query the full status mapping for `path`.
    async fn query_status(&self, path: &Path) -> LabelResult<LabelStatus>;

    /// Apply `label_id` to `path` and return the wall-clock time it took.
    ///
    /// A refusal by the tool must surface as [`LabelError::ApplyFailed`](crate::LabelError::ApplyFailed)
    /// carrying the tool's literal message.
    async fn apply_label(&self, path: &Path, label_id: &LabelId) -> LabelResult<Duration>;
}
