use crate::modules::provider::{
    domain::{Capability, ModuleId},
    traits::{
        AnimeDetailParser, AnimeProxyClass, AnimeSearcher, AnimeUrlParser, DanmakuDataParser,
        DanmakuDetailParser, DanmakuSearcher,
    },
};
use crate::shared::errors::AppResult;
use std::fmt;
use std::sync::Arc;

/// How much of a module to instantiate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadScope {
    /// Searchers, parsers and proxy: the module is enabled
    Full,
    /// Parsers and proxy only, used to parse items reached by direct link
    /// while the module is disabled
    UtilsOnly,
}

/// Handler bundle of one instantiated module
#[derive(Clone, Default)]
pub struct ModuleHandlers {
    pub anime_searcher: Option<Arc<AnimeSearcher>>,
    pub danmaku_searcher: Option<Arc<DanmakuSearcher>>,
    pub anime_detail_parser: Option<Arc<dyn AnimeDetailParser>>,
    pub anime_url_parser: Option<Arc<dyn AnimeUrlParser>>,
    pub danmaku_detail_parser: Option<Arc<dyn DanmakuDetailParser>>,
    pub danmaku_data_parser: Option<Arc<dyn DanmakuDataParser>>,
    pub anime_proxy_class: Option<Arc<dyn AnimeProxyClass>>,
}

impl ModuleHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anime_searcher(mut self, searcher: Arc<AnimeSearcher>) -> Self {
        self.anime_searcher = Some(searcher);
        self
    }

    pub fn with_danmaku_searcher(mut self, searcher: Arc<DanmakuSearcher>) -> Self {
        self.danmaku_searcher = Some(searcher);
        self
    }

    pub fn with_anime_detail_parser(mut self, parser: Arc<dyn AnimeDetailParser>) -> Self {
        self.anime_detail_parser = Some(parser);
        self
    }

    pub fn with_anime_url_parser(mut self, parser: Arc<dyn AnimeUrlParser>) -> Self {
        self.anime_url_parser = Some(parser);
        self
    }

    pub fn with_danmaku_detail_parser(mut self, parser: Arc<dyn DanmakuDetailParser>) -> Self {
        self.danmaku_detail_parser = Some(parser);
        self
    }

    pub fn with_danmaku_data_parser(mut self, parser: Arc<dyn DanmakuDataParser>) -> Self {
        self.danmaku_data_parser = Some(parser);
        self
    }

    pub fn with_anime_proxy_class(mut self, proxy: Arc<dyn AnimeProxyClass>) -> Self {
        self.anime_proxy_class = Some(proxy);
        self
    }

    /// Drop everything that is not allowed in the given scope
    pub fn restricted_to(mut self, scope: LoadScope) -> Self {
        if scope == LoadScope::UtilsOnly {
            self.anime_searcher = None;
            self.danmaku_searcher = None;
        }
        self
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        let present = [
            (self.anime_searcher.is_some(), Capability::AnimeSearch),
            (self.danmaku_searcher.is_some(), Capability::DanmakuSearch),
            (self.anime_detail_parser.is_some(), Capability::AnimeDetail),
            (self.anime_url_parser.is_some(), Capability::AnimeUrl),
            (self.danmaku_detail_parser.is_some(), Capability::DanmakuDetail),
            (self.danmaku_data_parser.is_some(), Capability::DanmakuData),
            (self.anime_proxy_class.is_some(), Capability::AnimeProxy),
        ];
        present
            .into_iter()
            .filter_map(|(has, capability)| has.then_some(capability))
            .collect()
    }
}

impl fmt::Debug for ModuleHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandlers")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// Factory trait for instantiating a provider module's handlers
pub trait ModuleFactory: Send + Sync {
    /// Id of the module this factory creates
    fn module_id(&self) -> ModuleId;

    /// Instantiate the module's handlers. Searchers returned for
    /// [`LoadScope::UtilsOnly`] are discarded by the registry.
    fn create_handlers(&self, scope: LoadScope) -> AppResult<ModuleHandlers>;
}

type HandlerBuilder = dyn Fn(LoadScope) -> AppResult<ModuleHandlers> + Send + Sync;

/// Factory backed by a closure, for modules assembled in code
pub struct FnModuleFactory {
    module: ModuleId,
    build: Box<HandlerBuilder>,
}

impl FnModuleFactory {
    pub fn new<F>(module: ModuleId, build: F) -> Self
    where
        F: Fn(LoadScope) -> AppResult<ModuleHandlers> + Send + Sync + 'static,
    {
        Self {
            module,
            build: Box::new(build),
        }
    }
}

impl ModuleFactory for FnModuleFactory {
    fn module_id(&self) -> ModuleId {
        self.module.clone()
    }

    fn create_handlers(&self, scope: LoadScope) -> AppResult<ModuleHandlers> {
        (self.build)(scope)
    }
}
