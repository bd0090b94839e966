mod error;
pub use error::ExecError;

mod encoding;
pub use encoding::OutputEncoding;

mod template;
pub use template::{CommandTemplate, LABEL_ID_VAR, PATH_VAR};

#[cfg(feature = "subprocess")]
pub mod subprocess;
