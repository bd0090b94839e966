//! Field names emitted by `Get-AIPFileStatus | ConvertTo-Json`.

/// Identifier of the top-level classification label.
pub const MAIN_LABEL_ID: &str = "MainLabelId";

/// Identifier of the sub-label; preferred over [`MAIN_LABEL_ID`] when set.
pub const SUB_LABEL_ID: &str = "SubLabelId";

pub const MAIN_LABEL_NAME: &str = "MainLabelName";
pub const SUB_LABEL_NAME: &str = "SubLabelName";
pub const FILE_NAME: &str = "FileName";
pub const IS_LABELED: &str = "IsLabeled";
