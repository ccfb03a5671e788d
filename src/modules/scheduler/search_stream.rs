use crate::modules::provider::{traits::MetaSearcher, Capability, ModuleId, ProviderRegistry, Registered};
use crate::modules::scheduler::diagnostics::{SchedulerEvent, SchedulerObserver};
use crate::modules::scheduler::isolation::panic_message;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use futures::stream::{self, BoxStream, StreamExt};
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Reads the enabled searchers of one capability from the registry
pub(crate) type SearcherLookup<M> = fn(&dyn ProviderRegistry) -> Vec<Registered<dyn MetaSearcher<M>>>;

/// Drives enabled searchers one after another and concatenates their
/// results.
///
/// The registry is re-read before each next searcher is started: the first
/// enabled module not yet visited is driven next. Modules disabled mid-search
/// are skipped if they have not started, modules enabled mid-search are
/// picked up if still ahead.
struct SequentialSearch<M> {
    registry: Arc<dyn ProviderRegistry>,
    observer: Arc<dyn SchedulerObserver>,
    capability: Capability,
    keyword: String,
    lookup: SearcherLookup<M>,
    visited: HashSet<ModuleId>,
    current: Option<(ModuleId, BoxStream<'static, AppResult<M>>)>,
    timer: Option<TimedOperation>,
}

pub(crate) fn sequential_search<M: Send + 'static>(
    registry: Arc<dyn ProviderRegistry>,
    observer: Arc<dyn SchedulerObserver>,
    capability: Capability,
    keyword: String,
    lookup: SearcherLookup<M>,
) -> BoxStream<'static, M> {
    let search = SequentialSearch {
        registry,
        observer,
        capability,
        keyword,
        lookup,
        visited: HashSet::new(),
        current: None,
        timer: None,
    };

    stream::unfold(search, |mut search| async move {
        let item = search.next_item().await?;
        Some((item, search))
    })
    .boxed()
}

impl<M: Send + 'static> SequentialSearch<M> {
    async fn next_item(&mut self) -> Option<M> {
        loop {
            let polled = match self.current.as_mut() {
                Some((_, results)) => AssertUnwindSafe(results.next()).catch_unwind().await,
                None => {
                    if !self.start_next_searcher() {
                        return None;
                    }
                    continue;
                }
            };

            match polled {
                Ok(Some(Ok(item))) => return Some(item),
                Ok(Some(Err(e))) => self.abandon_current(e.to_string()),
                Ok(None) => {
                    if let Some((module, _)) = self.current.take() {
                        debug!("{} exhausted", module);
                    }
                }
                Err(payload) => self.abandon_current(panic_message(payload.as_ref())),
            }
        }
    }

    /// Start the next unvisited searcher. Returns `false` once the search is
    /// over.
    fn start_next_searcher(&mut self) -> bool {
        let searchers = (self.lookup)(self.registry.as_ref());

        if self.timer.is_none() {
            if searchers.is_empty() {
                self.emit(SchedulerEvent::NoProviderEnabled {
                    capability: self.capability,
                });
                return false;
            }
            self.timer = Some(TimedOperation::new(&format!(
                "searching [{}] with every {}",
                self.keyword, self.capability
            )));
        }

        let Some(next) = searchers
            .into_iter()
            .find(|searcher| !self.visited.contains(&searcher.module))
        else {
            self.finish();
            return false;
        };

        self.visited.insert(next.module.clone());
        self.emit(SchedulerEvent::ProviderSearching {
            capability: self.capability,
            module: next.module.clone(),
            keyword: self.keyword.clone(),
        });

        let keyword = self.keyword.as_str();
        match catch_unwind(AssertUnwindSafe(|| next.handler.search(keyword))) {
            Ok(results) => self.current = Some((next.module, results)),
            Err(payload) => self.emit(SchedulerEvent::ProviderFailed {
                capability: self.capability,
                module: next.module,
                reason: panic_message(payload.as_ref()),
            }),
        }
        true
    }

    fn abandon_current(&mut self, reason: String) {
        if let Some((module, _)) = self.current.take() {
            self.emit(SchedulerEvent::ProviderFailed {
                capability: self.capability,
                module,
                reason,
            });
        }
    }

    fn finish(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.emit(SchedulerEvent::SearchFinished {
                capability: self.capability,
                keyword: self.keyword.clone(),
                elapsed: timer.elapsed(),
            });
        }
    }

    fn emit(&self, event: SchedulerEvent) {
        self.observer.on_event(&event);
    }
}
