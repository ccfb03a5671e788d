/// Test helper functions and scheduler builders
use super::fakes::RecordingObserver;
use anime_aggregator_lib::modules::provider::{
    domain::{ModuleConfig, ModuleFactory},
    ModuleRegistry,
};
use anime_aggregator_lib::modules::provider::traits::{
    AnimeDetailParser, AnimeProxyClass, AnimeSearcher, AnimeUrlParser, DanmakuDataParser,
    DanmakuDetailParser, DanmakuSearcher,
};
use anime_aggregator_lib::{AppResult, ModuleId, ProviderRegistry, Registered, Scheduler};
use futures::stream::{BoxStream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct TestScheduler {
    pub scheduler: Scheduler,
    pub registry: Arc<ModuleRegistry>,
    pub observer: Arc<RecordingObserver>,
}

/// Build a scheduler over the given modules with a recording observer
pub fn build_scheduler(factories: Vec<Arc<dyn ModuleFactory>>, config: ModuleConfig) -> TestScheduler {
    let registry = Arc::new(ModuleRegistry::new(factories, &config));
    let observer = Arc::new(RecordingObserver::default());
    let scheduler = Scheduler::with_observer(registry.clone(), observer.clone());

    TestScheduler {
        scheduler,
        registry,
        observer,
    }
}

/// Build a scheduler with every module enabled
pub fn build_default_scheduler(factories: Vec<Arc<dyn ModuleFactory>>) -> TestScheduler {
    build_scheduler(factories, ModuleConfig::default())
}

pub async fn collect<M>(stream: BoxStream<'static, M>) -> Vec<M> {
    stream.collect().await
}

pub fn titles<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a anime_aggregator_lib::AnimeMeta>,
{
    items.into_iter().map(|meta| meta.title.clone()).collect()
}

/// Registry wrapper counting how often the searcher lists are read
pub struct CountingRegistry {
    inner: Arc<ModuleRegistry>,
    searcher_reads: AtomicUsize,
}

impl CountingRegistry {
    pub fn new(inner: Arc<ModuleRegistry>) -> Self {
        Self {
            inner,
            searcher_reads: AtomicUsize::new(0),
        }
    }

    pub fn searcher_reads(&self) -> usize {
        self.searcher_reads.load(Ordering::SeqCst)
    }
}

impl ProviderRegistry for CountingRegistry {
    fn anime_searchers(&self) -> Vec<Registered<AnimeSearcher>> {
        self.searcher_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.anime_searchers()
    }

    fn danmaku_searchers(&self) -> Vec<Registered<DanmakuSearcher>> {
        self.searcher_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.danmaku_searchers()
    }

    fn anime_detail_parser(&self, module: &ModuleId) -> Option<Arc<dyn AnimeDetailParser>> {
        self.inner.anime_detail_parser(module)
    }

    fn anime_url_parser(&self, module: &ModuleId) -> Option<Arc<dyn AnimeUrlParser>> {
        self.inner.anime_url_parser(module)
    }

    fn danmaku_detail_parser(&self, module: &ModuleId) -> Option<Arc<dyn DanmakuDetailParser>> {
        self.inner.danmaku_detail_parser(module)
    }

    fn danmaku_data_parser(&self, module: &ModuleId) -> Option<Arc<dyn DanmakuDataParser>> {
        self.inner.danmaku_data_parser(module)
    }

    fn anime_proxy_class(&self, module: &ModuleId) -> Option<Arc<dyn AnimeProxyClass>> {
        self.inner.anime_proxy_class(module)
    }

    fn load_utils_module(&self, module: &ModuleId) -> AppResult<()> {
        self.inner.load_utils_module(module)
    }

    fn change_module_state(&self, module: &ModuleId, enable: bool) -> AppResult<()> {
        self.inner.change_module_state(module, enable)
    }
}
