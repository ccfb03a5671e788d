pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy external access
pub use domain::{Capability, ModuleId, ProviderRegistry, Registered};
pub use infrastructure::ModuleRegistry;
