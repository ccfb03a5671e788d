pub mod anime;
pub mod danmaku;
pub mod module_config;

pub use anime::*;
pub use danmaku::*;
pub use module_config::*;
