mod domain;
pub use domain::{LabelId, LabelStatus, ReadMode, ReadOutcome};
pub use domain::{
    FILE_NAME, IS_LABELED, MAIN_LABEL_ID, MAIN_LABEL_NAME, SUB_LABEL_ID, SUB_LABEL_NAME,
};

mod error;
pub use error::{ModelError, ModelResult};
