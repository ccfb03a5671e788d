use std::fmt;
use std::sync::Arc;

use crate::{
    modules::provider::{
        domain::ModuleId,
        traits::{
            AnimeDetailParser, AnimeProxyClass, AnimeSearcher, AnimeUrlParser,
            DanmakuDataParser, DanmakuDetailParser, DanmakuSearcher,
        },
    },
    shared::errors::AppResult,
};

/// A handler paired with the module that registered it
pub struct Registered<H: ?Sized> {
    pub module: ModuleId,
    pub handler: Arc<H>,
}

impl<H: ?Sized> Registered<H> {
    pub fn new(module: ModuleId, handler: Arc<H>) -> Self {
        Self { module, handler }
    }
}

impl<H: ?Sized> Clone for Registered<H> {
    fn clone(&self) -> Self {
        Self {
            module: self.module.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: ?Sized> fmt::Debug for Registered<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Registry of provider modules and the handlers they currently expose.
///
/// Implementations own every handler; callers only borrow them through the
/// returned `Arc`s for the duration of a call. Reads always reflect the
/// current enable state, nothing is snapshotted on the caller's side.
pub trait ProviderRegistry: Send + Sync {
    /// Searchers of enabled modules, in search order
    fn anime_searchers(&self) -> Vec<Registered<AnimeSearcher>>;

    /// Searchers of enabled modules, in search order
    fn danmaku_searchers(&self) -> Vec<Registered<DanmakuSearcher>>;

    fn anime_detail_parser(&self, module: &ModuleId) -> Option<Arc<dyn AnimeDetailParser>>;

    fn anime_url_parser(&self, module: &ModuleId) -> Option<Arc<dyn AnimeUrlParser>>;

    fn danmaku_detail_parser(&self, module: &ModuleId) -> Option<Arc<dyn DanmakuDetailParser>>;

    fn danmaku_data_parser(&self, module: &ModuleId) -> Option<Arc<dyn DanmakuDataParser>>;

    fn anime_proxy_class(&self, module: &ModuleId) -> Option<Arc<dyn AnimeProxyClass>>;

    /// Instantiate the module's read-only parsers without enabling its
    /// searchers. Idempotent.
    fn load_utils_module(&self, module: &ModuleId) -> AppResult<()>;

    /// Enable or disable a module. Idempotent.
    fn change_module_state(&self, module: &ModuleId, enable: bool) -> AppResult<()>;
}
