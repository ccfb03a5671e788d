/// Test data factories using builder pattern
///
/// Provides convenient methods to create modules and items with sensible defaults
use super::fakes::{RefererProxy, ScriptedSearcher, StaticParser};
use anime_aggregator_lib::modules::provider::traits::AnimeDetailParser;
use anime_aggregator_lib::modules::provider::domain::{
    AnimePlayList, DanmakuCollection, DanmakuItem, DanmakuPosition, FnModuleFactory, LoadScope,
    ModuleFactory, ModuleHandlers,
};
use anime_aggregator_lib::{
    Anime, AnimeDetail, AnimeInfo, AnimeMeta, Danmaku, DanmakuData, DanmakuDetail, DanmakuMeta,
    ModuleId,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn id(raw: &str) -> ModuleId {
    ModuleId::new(raw).unwrap()
}

pub fn anime_meta(module: &str, title: &str) -> AnimeMeta {
    AnimeMeta::new(id(module), title, format!("https://{}/detail/{}", module, title))
}

pub fn danmaku_meta(module: &str, title: &str) -> DanmakuMeta {
    DanmakuMeta::new(id(module), title, format!("https://{}/play/{}", module, title))
}

pub fn episode(module: &str, name: &str) -> Anime {
    Anime::new(id(module), name, format!("/vp/{}", name))
}

pub fn danmaku_track(module: &str, cid: &str) -> Danmaku {
    Danmaku::new(id(module), format!("track {}", cid), cid)
}

pub fn detail_with_episodes(module: &str, title: &str, episodes: usize) -> AnimeDetail {
    AnimeDetail {
        title: title.to_string(),
        module: Some(id(module)),
        playlists: vec![AnimePlayList {
            name: "main".to_string(),
            items: (1..=episodes)
                .map(|n| episode(module, &format!("ep{}", n)))
                .collect(),
        }],
        ..AnimeDetail::default()
    }
}

pub fn danmaku_detail_with_tracks(module: &str, title: &str, tracks: usize) -> DanmakuDetail {
    DanmakuDetail {
        title: title.to_string(),
        module: Some(id(module)),
        collections: vec![DanmakuCollection {
            name: "season 1".to_string(),
            items: (1..=tracks)
                .map(|n| danmaku_track(module, &n.to_string()))
                .collect(),
        }],
    }
}

pub fn danmaku_data(texts: &[&str]) -> DanmakuData {
    DanmakuData {
        items: texts
            .iter()
            .enumerate()
            .map(|(n, text)| DanmakuItem {
                time: n as f32,
                position: DanmakuPosition::Scroll,
                color: 0xffffff,
                text: text.to_string(),
            })
            .collect(),
    }
}

/// How often a module was instantiated, per scope
#[derive(Clone, Default)]
pub struct LoadCounters {
    full: Arc<AtomicUsize>,
    utils: Arc<AtomicUsize>,
}

impl LoadCounters {
    pub fn full(&self) -> usize {
        self.full.load(Ordering::SeqCst)
    }

    pub fn utils(&self) -> usize {
        self.utils.load(Ordering::SeqCst)
    }
}

pub struct ModuleBuilder {
    module: ModuleId,
    handlers: ModuleHandlers,
    counters: LoadCounters,
}

impl ModuleBuilder {
    pub fn new(module: &str) -> Self {
        Self {
            module: id(module),
            handlers: ModuleHandlers::new(),
            counters: LoadCounters::default(),
        }
    }

    pub fn anime_searcher(mut self, searcher: ScriptedSearcher<AnimeMeta>) -> Self {
        self.handlers = self.handlers.with_anime_searcher(Arc::new(searcher));
        self
    }

    pub fn danmaku_searcher(mut self, searcher: ScriptedSearcher<DanmakuMeta>) -> Self {
        self.handlers = self.handlers.with_danmaku_searcher(Arc::new(searcher));
        self
    }

    pub fn detail_parser(mut self, parser: StaticParser<AnimeDetail>) -> Self {
        self.handlers = self.handlers.with_anime_detail_parser(Arc::new(parser));
        self
    }

    pub fn detail_handler(mut self, parser: Arc<dyn AnimeDetailParser>) -> Self {
        self.handlers = self.handlers.with_anime_detail_parser(parser);
        self
    }

    pub fn url_parser(mut self, parser: StaticParser<AnimeInfo>) -> Self {
        self.handlers = self.handlers.with_anime_url_parser(Arc::new(parser));
        self
    }

    pub fn danmaku_detail_parser(mut self, parser: StaticParser<DanmakuDetail>) -> Self {
        self.handlers = self.handlers.with_danmaku_detail_parser(Arc::new(parser));
        self
    }

    pub fn danmaku_data_parser(mut self, parser: StaticParser<DanmakuData>) -> Self {
        self.handlers = self.handlers.with_danmaku_data_parser(Arc::new(parser));
        self
    }

    pub fn proxy(mut self, referer: &str) -> Self {
        self.handlers = self.handlers.with_anime_proxy_class(Arc::new(RefererProxy {
            referer: referer.to_string(),
        }));
        self
    }

    pub fn counters(&self) -> LoadCounters {
        self.counters.clone()
    }

    pub fn build(self) -> Arc<dyn ModuleFactory> {
        let handlers = self.handlers;
        let counters = self.counters;
        Arc::new(FnModuleFactory::new(self.module, move |scope| {
            match scope {
                LoadScope::Full => counters.full.fetch_add(1, Ordering::SeqCst),
                LoadScope::UtilsOnly => counters.utils.fetch_add(1, Ordering::SeqCst),
            };
            Ok(handlers.clone())
        }))
    }
}
