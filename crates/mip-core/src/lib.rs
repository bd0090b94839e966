pub mod api;
pub mod backend;
pub mod error;

pub use api::{Applied, LabelApi};
pub use backend::LabelBackend;
pub use error::{LabelError, LabelResult};

pub mod prelude {
    pub use crate::api::{Applied, LabelApi};
    pub use crate::backend::LabelBackend;
    pub use crate::error::{LabelError, LabelResult};
}
