use crate::modules::provider::{Capability, ModuleId};
use crate::shared::utils::logger::LogContext;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Informational events emitted by the scheduler. None of them changes what
/// a caller receives; they exist for logs and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// A search found no enabled searcher for its capability
    NoProviderEnabled { capability: Capability },
    /// A module's searcher is about to be driven
    ProviderSearching {
        capability: Capability,
        module: ModuleId,
        keyword: String,
    },
    /// A module's search failed or panicked; the search moved on
    ProviderFailed {
        capability: Capability,
        module: ModuleId,
        reason: String,
    },
    /// Every enabled searcher was exhausted
    SearchFinished {
        capability: Capability,
        keyword: String,
        elapsed: Duration,
    },
    /// No active handler, the module's utility handlers are being loaded
    FallbackLoading {
        capability: Capability,
        module: ModuleId,
    },
    FallbackLoadFailed { module: ModuleId, reason: String },
    /// No handler could be resolved; the empty value is returned
    HandlerMissing {
        capability: Capability,
        module: ModuleId,
    },
    Parsing {
        capability: Capability,
        module: ModuleId,
        locator: String,
    },
    /// The handler returned an error or panicked; the empty value is returned
    ParseFailed {
        capability: Capability,
        module: ModuleId,
        reason: String,
    },
    /// The url parser produced a link that is not available
    LinkUnavailable { module: ModuleId, raw_url: String },
    /// A danmaku data parser returned, successfully or not; `items` is 0 on
    /// failure
    DanmakuDataRead {
        module: ModuleId,
        items: usize,
        elapsed: Duration,
    },
}

/// Receives every [`SchedulerEvent`]
pub trait SchedulerObserver: Send + Sync {
    fn on_event(&self, event: &SchedulerEvent);
}

/// Default observer: writes events through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SchedulerObserver for TracingObserver {
    fn on_event(&self, event: &SchedulerEvent) {
        match event {
            SchedulerEvent::NoProviderEnabled { capability } => {
                warn!("No {} enabled", capability)
            }
            SchedulerEvent::ProviderSearching {
                module, keyword, ..
            } => LogContext::search_operation(keyword, Some(module.as_str()), None),
            SchedulerEvent::ProviderFailed {
                capability,
                module,
                reason,
            } => warn!("{} {} failed, skipping it: {}", capability, module, reason),
            SchedulerEvent::SearchFinished {
                keyword, elapsed, ..
            } => LogContext::search_operation(keyword, None, Some(*elapsed)),
            SchedulerEvent::FallbackLoading { capability, module } => info!(
                "No {} loaded for {}, loading its utility handlers",
                capability, module
            ),
            SchedulerEvent::FallbackLoadFailed { module, reason } => {
                warn!("Loading utility handlers of {} failed: {}", module, reason)
            }
            SchedulerEvent::HandlerMissing { capability, module } => {
                warn!("No {} available for {}", capability, module)
            }
            SchedulerEvent::Parsing {
                capability: Capability::DanmakuData,
                module,
                locator,
            } => debug!("{} danmaku data parser parsing {}", module, locator),
            SchedulerEvent::Parsing {
                capability,
                module,
                locator,
            } => info!("{} {} parsing {}", module, capability, locator),
            SchedulerEvent::ParseFailed {
                capability,
                module,
                reason,
            } => warn!("{} {} failed: {}", module, capability, reason),
            SchedulerEvent::LinkUnavailable { module, raw_url } => {
                warn!("Parse real url failed: {} returned nothing for {}", module, raw_url)
            }
            SchedulerEvent::DanmakuDataRead {
                module,
                items,
                elapsed,
            } => LogContext::performance_metric(
                &format!("Reading {} danmaku from {}", items, module),
                *elapsed,
            ),
        }
    }
}
