// Shared kernel: errors and logging used by every module

pub mod errors;
pub mod utils;
