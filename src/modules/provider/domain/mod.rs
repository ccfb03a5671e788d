pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::*;
pub use repositories::{ProviderRegistry, Registered};
pub use services::{FnModuleFactory, LoadScope, ModuleFactory, ModuleHandlers};
pub use value_objects::{Capability, ModuleId};
