pub mod provider;
pub mod scheduler;
