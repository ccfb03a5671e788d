use crate::modules::provider::{Capability, ModuleId, ProviderRegistry};
use crate::modules::scheduler::diagnostics::{SchedulerEvent, SchedulerObserver};
use std::sync::Arc;

/// Handler lookup for one module.
///
/// `Active → TryInstantiateUtilityOnly → Resolved | Absent`. The utility
/// step only ever leads to a terminal state, so the registry is asked to load
/// a module at most once per resolution.
pub(crate) enum HandlerResolution<H: ?Sized> {
    Active,
    TryInstantiateUtilityOnly,
    Resolved(Arc<H>),
    Absent,
}

/// Registry, observer and target of one resolution
pub(crate) struct ResolutionContext<'a> {
    pub registry: &'a dyn ProviderRegistry,
    pub observer: &'a dyn SchedulerObserver,
    pub capability: Capability,
    pub module: &'a ModuleId,
}

impl<H: ?Sized> HandlerResolution<H> {
    /// Look up the handler, loading the module's utility handlers on a miss
    pub(crate) fn with_fallback<L>(ctx: &ResolutionContext<'_>, lookup: L) -> Option<Arc<H>>
    where
        L: Fn(&dyn ProviderRegistry, &ModuleId) -> Option<Arc<H>>,
    {
        let mut state = HandlerResolution::Active;
        loop {
            state = match state {
                HandlerResolution::Active => match lookup(ctx.registry, ctx.module) {
                    Some(handler) => HandlerResolution::Resolved(handler),
                    None => HandlerResolution::TryInstantiateUtilityOnly,
                },
                HandlerResolution::TryInstantiateUtilityOnly => {
                    ctx.observer.on_event(&SchedulerEvent::FallbackLoading {
                        capability: ctx.capability,
                        module: ctx.module.clone(),
                    });
                    if let Err(e) = ctx.registry.load_utils_module(ctx.module) {
                        ctx.observer.on_event(&SchedulerEvent::FallbackLoadFailed {
                            module: ctx.module.clone(),
                            reason: e.to_string(),
                        });
                    }
                    match lookup(ctx.registry, ctx.module) {
                        Some(handler) => HandlerResolution::Resolved(handler),
                        None => HandlerResolution::Absent,
                    }
                }
                HandlerResolution::Resolved(handler) => return Some(handler),
                HandlerResolution::Absent => {
                    ctx.missing();
                    return None;
                }
            };
        }
    }

    /// Look up the handler among active modules only
    pub(crate) fn active_only<L>(ctx: &ResolutionContext<'_>, lookup: L) -> Option<Arc<H>>
    where
        L: Fn(&dyn ProviderRegistry, &ModuleId) -> Option<Arc<H>>,
    {
        let handler = lookup(ctx.registry, ctx.module);
        if handler.is_none() {
            ctx.missing();
        }
        handler
    }
}

impl ResolutionContext<'_> {
    fn missing(&self) {
        self.observer.on_event(&SchedulerEvent::HandlerMissing {
            capability: self.capability,
            module: self.module.clone(),
        });
    }
}
