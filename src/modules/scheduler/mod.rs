pub mod diagnostics;
mod isolation;
mod resolution;
mod search_stream;
pub mod service;

pub use diagnostics::{SchedulerEvent, SchedulerObserver, TracingObserver};
pub use service::Scheduler;
