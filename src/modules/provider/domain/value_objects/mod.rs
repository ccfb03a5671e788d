pub mod capability;
pub mod module_id;

pub use capability::*;
pub use module_id::*;
