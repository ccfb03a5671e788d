pub mod manager;

// Re-export commonly used types
pub use manager::{ModuleRegistry, ModuleStatus};
