pub mod modules;
pub mod shared;

use modules::provider::{domain::ModuleFactory, ModuleRegistry};
use shared::utils::{env::load_dotenv, logger::init_logger};
use std::sync::Arc;

pub use modules::provider::{
    domain::{
        Anime, AnimeDetail, AnimeInfo, AnimeMeta, Danmaku, DanmakuData, DanmakuDetail,
        DanmakuMeta,
    },
    Capability, ModuleId, ProviderRegistry, Registered,
};
pub use modules::scheduler::{Scheduler, SchedulerEvent, SchedulerObserver};
pub use shared::errors::{AppError, AppResult};

/// Assemble a scheduler over the given provider modules.
///
/// Loads `.env`, initializes logging, reads the module configuration named by
/// `MODULE_CONFIG_PATH` and instantiates every enabled module. A malformed
/// `.env` file is an error.
pub fn build_scheduler(factories: Vec<Arc<dyn ModuleFactory>>) -> AppResult<Scheduler> {
    load_dotenv()?;
    init_logger();

    let registry = Arc::new(ModuleRegistry::from_env(factories)?);
    Ok(Scheduler::new(registry))
}
