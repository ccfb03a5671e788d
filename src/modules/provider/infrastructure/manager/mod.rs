mod module_registry;

pub use module_registry::{ModuleRegistry, ModuleStatus};
