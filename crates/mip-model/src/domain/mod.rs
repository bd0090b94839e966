mod label_id;
pub use label_id::LabelId;

mod status;
pub use status::LabelStatus;

mod mode;
pub use mode::{ReadMode, ReadOutcome};

mod constants;
pub use constants::{
    FILE_NAME, IS_LABELED, MAIN_LABEL_ID, MAIN_LABEL_NAME, SUB_LABEL_ID, SUB_LABEL_NAME,
};
