/// Hand-written provider handlers with scripted behavior
use anime_aggregator_lib::modules::provider::traits::{
    AnimeDetailParser, AnimeProxyClass, AnimeUrlParser, DanmakuDataParser, DanmakuDetailParser,
    MetaSearcher,
};
use anime_aggregator_lib::{
    AnimeDetail, AnimeInfo, AppError, AppResult, DanmakuData, DanmakuDetail, SchedulerEvent,
    SchedulerObserver,
};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a scripted searcher ends after yielding its items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Exhausted,
    Error,
    Panic,
}

pub struct ScriptedSearcher<M> {
    items: Vec<M>,
    ending: Ending,
    delay: Duration,
    panic_on_start: bool,
    pub calls: Arc<AtomicUsize>,
}

impl<M: Clone> ScriptedSearcher<M> {
    pub fn new(items: Vec<M>) -> Self {
        Self {
            items,
            ending: Ending::Exhausted,
            delay: Duration::ZERO,
            panic_on_start: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn ending(mut self, ending: Ending) -> Self {
        self.ending = ending;
        self
    }

    /// Sleep before each item
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Panic inside `search` itself, before any stream exists
    pub fn panic_on_start(mut self) -> Self {
        self.panic_on_start = true;
        self
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

async fn search_failed<M>() -> AppResult<M> {
    Err(AppError::ProviderError("upstream returned 502".to_string()))
}

async fn search_panicked<M>() -> AppResult<M> {
    panic!("searcher exploded")
}

impl<M: Clone + Send + Sync + 'static> MetaSearcher<M> for ScriptedSearcher<M> {
    fn search(&self, _keyword: &str) -> BoxStream<'static, AppResult<M>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_start {
            panic!("searcher refused to start");
        }

        let delay = self.delay;
        let items = stream::iter(self.items.clone()).then(move |item| async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok::<M, AppError>(item)
        });

        let tail: BoxStream<'static, AppResult<M>> = match self.ending {
            Ending::Exhausted => stream::empty().boxed(),
            Ending::Error => stream::once(search_failed()).boxed(),
            Ending::Panic => stream::once(search_panicked()).boxed(),
        };

        items.chain(tail).boxed()
    }
}

/// Parser returning a fixed value, or a fixed error
pub struct StaticParser<T> {
    result: AppResult<T>,
    panics: bool,
    pub calls: Arc<AtomicUsize>,
}

impl<T: Clone> StaticParser<T> {
    pub fn returning(value: T) -> Self {
        Self {
            result: Ok(value),
            panics: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(AppError::ProviderError("page layout changed".to_string())),
            panics: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn panicking() -> Self {
        Self {
            result: Err(AppError::InternalError("unreachable".to_string())),
            panics: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn respond(&self) -> AppResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("parser exploded");
        }
        self.result.clone()
    }
}

#[async_trait]
impl AnimeDetailParser for StaticParser<AnimeDetail> {
    async fn parse(&self, _detail_url: &str) -> AppResult<AnimeDetail> {
        self.respond()
    }
}

#[async_trait]
impl AnimeUrlParser for StaticParser<AnimeInfo> {
    async fn parse(&self, _raw_url: &str) -> AppResult<AnimeInfo> {
        self.respond()
    }
}

#[async_trait]
impl DanmakuDetailParser for StaticParser<DanmakuDetail> {
    async fn parse(&self, _play_url: &str) -> AppResult<DanmakuDetail> {
        self.respond()
    }
}

#[async_trait]
impl DanmakuDataParser for StaticParser<DanmakuData> {
    async fn parse(&self, _cid: &str) -> AppResult<DanmakuData> {
        self.respond()
    }
}

/// Detail parser written without `#[async_trait]` that panics before it
/// hands out a future
pub struct EagerPanicParser;

impl AnimeDetailParser for EagerPanicParser {
    fn parse<'life0, 'life1, 'async_trait>(
        &'life0 self,
        _detail_url: &'life1 str,
    ) -> Pin<Box<dyn Future<Output = AppResult<AnimeDetail>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        panic!("parser failed before returning a future")
    }
}

pub struct RefererProxy {
    pub referer: String,
}

impl AnimeProxyClass for RefererProxy {
    fn name(&self) -> &str {
        "referer-proxy"
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        vec![("Referer".to_string(), self.referer.clone())]
    }
}

/// Observer that keeps every event for later assertions
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SchedulerEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<SchedulerEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&SchedulerEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }
}

impl SchedulerObserver for RecordingObserver {
    fn on_event(&self, event: &SchedulerEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
