use crate::modules::provider::{
    domain::{
        Anime, AnimeDetail, AnimeInfo, AnimeMeta, Danmaku, DanmakuData, DanmakuDetail,
        DanmakuMeta,
    },
    traits::AnimeProxyClass,
    Capability, ModuleId, ProviderRegistry,
};
use crate::modules::scheduler::{
    diagnostics::{SchedulerEvent, SchedulerObserver, TracingObserver},
    isolation::isolate,
    resolution::{HandlerResolution, ResolutionContext},
    search_stream::sequential_search,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;

/// Dispatches searches and parse requests to provider modules.
///
/// Searches drive the enabled modules one at a time, in registry order, and
/// stream their results as they arrive. Parse requests are routed by the
/// item's owning module. No call ever fails: a missing handler, a provider
/// error or a provider panic all yield the empty value of the result type.
#[derive(Clone)]
pub struct Scheduler {
    registry: Arc<dyn ProviderRegistry>,
    observer: Arc<dyn SchedulerObserver>,
}

impl Scheduler {
    pub fn new(registry: Arc<dyn ProviderRegistry>) -> Self {
        Self::with_observer(registry, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        registry: Arc<dyn ProviderRegistry>,
        observer: Arc<dyn SchedulerObserver>,
    ) -> Self {
        Self { registry, observer }
    }

    /// Search every enabled anime searcher for `keyword`
    pub fn search_anime(&self, keyword: &str) -> BoxStream<'static, AnimeMeta> {
        if keyword.trim().is_empty() {
            return stream::empty().boxed();
        }

        sequential_search(
            Arc::clone(&self.registry),
            Arc::clone(&self.observer),
            Capability::AnimeSearch,
            keyword.to_string(),
            |registry| registry.anime_searchers(),
        )
    }

    /// Search every enabled danmaku searcher for `keyword`
    pub fn search_danmaku(&self, keyword: &str) -> BoxStream<'static, DanmakuMeta> {
        if keyword.trim().is_empty() {
            return stream::empty().boxed();
        }

        sequential_search(
            Arc::clone(&self.registry),
            Arc::clone(&self.observer),
            Capability::DanmakuSearch,
            keyword.to_string(),
            |registry| registry.danmaku_searchers(),
        )
    }

    /// Parse an anime detail page.
    ///
    /// Items opened by direct link may belong to a disabled module; its
    /// utility handlers are loaded once on demand in that case.
    pub async fn parse_anime_detail(&self, meta: &AnimeMeta) -> AnimeDetail {
        let ctx = self.context(Capability::AnimeDetail, &meta.module);
        let Some(parser) = HandlerResolution::with_fallback(&ctx, |registry, module| {
            registry.anime_detail_parser(module)
        }) else {
            return AnimeDetail::default();
        };

        self.parsing(Capability::AnimeDetail, &meta.module, &meta.detail_url);
        match isolate(|| parser.parse(&meta.detail_url)).await {
            Ok(detail) => detail,
            Err(reason) => {
                self.parse_failed(Capability::AnimeDetail, &meta.module, reason);
                AnimeDetail::default()
            }
        }
    }

    /// Resolve one episode's direct link. Unavailable links come back as
    /// `AnimeInfo::default()`.
    pub async fn parse_anime_real_url(&self, anime: &Anime) -> AnimeInfo {
        let ctx = self.context(Capability::AnimeUrl, &anime.module);
        let Some(parser) = HandlerResolution::active_only(&ctx, |registry, module| {
            registry.anime_url_parser(module)
        }) else {
            return AnimeInfo::default();
        };

        self.parsing(Capability::AnimeUrl, &anime.module, &anime.raw_url);
        match isolate(|| parser.parse(&anime.raw_url)).await {
            Ok(info) if info.is_available() => info,
            Ok(_) => {
                self.observer.on_event(&SchedulerEvent::LinkUnavailable {
                    module: anime.module.clone(),
                    raw_url: anime.raw_url.clone(),
                });
                AnimeInfo::default()
            }
            Err(reason) => {
                self.parse_failed(Capability::AnimeUrl, &anime.module, reason);
                AnimeInfo::default()
            }
        }
    }

    /// Proxy descriptor of the module that produced `meta`, if loaded
    pub fn get_anime_proxy_class(&self, meta: &AnimeMeta) -> Option<Arc<dyn AnimeProxyClass>> {
        self.registry.anime_proxy_class(&meta.module)
    }

    /// Parse a danmaku library, with the same on-demand loading as
    /// [`Scheduler::parse_anime_detail`]
    pub async fn parse_danmaku_detail(&self, meta: &DanmakuMeta) -> DanmakuDetail {
        let ctx = self.context(Capability::DanmakuDetail, &meta.module);
        let Some(parser) = HandlerResolution::with_fallback(&ctx, |registry, module| {
            registry.danmaku_detail_parser(module)
        }) else {
            return DanmakuDetail::default();
        };

        self.parsing(Capability::DanmakuDetail, &meta.module, &meta.play_url);
        match isolate(|| parser.parse(&meta.play_url)).await {
            Ok(detail) => detail,
            Err(reason) => {
                self.parse_failed(Capability::DanmakuDetail, &meta.module, reason);
                DanmakuDetail::default()
            }
        }
    }

    /// Read the danmaku payload of one episode
    pub async fn parse_danmaku_data(&self, danmaku: &Danmaku) -> DanmakuData {
        let ctx = self.context(Capability::DanmakuData, &danmaku.module);
        let Some(parser) = HandlerResolution::active_only(&ctx, |registry, module| {
            registry.danmaku_data_parser(module)
        }) else {
            return DanmakuData::default();
        };

        self.parsing(Capability::DanmakuData, &danmaku.module, &danmaku.cid);
        let timer = TimedOperation::new("reading danmaku data");
        let data = match isolate(|| parser.parse(&danmaku.cid)).await {
            Ok(data) => data,
            Err(reason) => {
                self.parse_failed(Capability::DanmakuData, &danmaku.module, reason);
                DanmakuData::default()
            }
        };

        self.observer.on_event(&SchedulerEvent::DanmakuDataRead {
            module: danmaku.module.clone(),
            items: data.len(),
            elapsed: timer.elapsed(),
        });
        data
    }

    /// Enable or disable a module. Forwarded to the registry as-is.
    pub fn change_module_state(&self, module: &ModuleId, enable: bool) -> AppResult<()> {
        self.registry.change_module_state(module, enable)
    }

    fn context<'a>(&'a self, capability: Capability, module: &'a ModuleId) -> ResolutionContext<'a> {
        ResolutionContext {
            registry: self.registry.as_ref(),
            observer: self.observer.as_ref(),
            capability,
            module,
        }
    }

    fn parsing(&self, capability: Capability, module: &ModuleId, locator: &str) {
        self.observer.on_event(&SchedulerEvent::Parsing {
            capability,
            module: module.clone(),
            locator: locator.to_string(),
        });
    }

    fn parse_failed(&self, capability: Capability, module: &ModuleId, reason: String) {
        self.observer.on_event(&SchedulerEvent::ParseFailed {
            capability,
            module: module.clone(),
            reason,
        });
    }
}
