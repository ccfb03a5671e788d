pub mod module_factory;

pub use module_factory::{FnModuleFactory, LoadScope, ModuleFactory, ModuleHandlers};
