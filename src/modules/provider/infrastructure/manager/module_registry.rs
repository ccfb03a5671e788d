use crate::{
    modules::provider::{
        domain::{
            LoadScope, ModuleConfig, ModuleFactory, ModuleHandlers, ModuleId, ProviderRegistry,
            Registered,
        },
        traits::{
            AnimeDetailParser, AnimeProxyClass, AnimeSearcher, AnimeUrlParser, DanmakuDataParser,
            DanmakuDetailParser, DanmakuSearcher,
        },
    },
    shared::errors::{AppError, AppResult},
    shared::utils::logger::LogContext,
};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use crate::{log_debug, log_info, log_warn};

struct CatalogEntry {
    module: ModuleId,
    factory: Arc<dyn ModuleFactory>,
    priority: u32,
}

struct LoadedModule {
    scope: LoadScope,
    handlers: ModuleHandlers,
}

/// Point-in-time view of one catalogued module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStatus {
    pub module: ModuleId,
    pub priority: u32,
    /// `None` when no handler of the module is instantiated
    pub loaded: Option<LoadScope>,
}

impl ModuleStatus {
    pub fn is_enabled(&self) -> bool {
        self.loaded == Some(LoadScope::Full)
    }
}

/// In-memory provider registry.
///
/// The catalog (known modules and their order) is fixed at construction;
/// which modules are instantiated, and in which scope, changes at runtime.
/// A module is enabled exactly when it is loaded with [`LoadScope::Full`].
pub struct ModuleRegistry {
    /// Sorted by priority, ties keep registration order
    catalog: Vec<CatalogEntry>,
    loaded: DashMap<ModuleId, LoadedModule>,
}

impl ModuleRegistry {
    /// Build the catalog and instantiate every module the configuration
    /// enables. Unlisted modules are enabled with their registration index as
    /// priority. A module whose factory fails stays disabled.
    pub fn new(factories: Vec<Arc<dyn ModuleFactory>>, config: &ModuleConfig) -> Self {
        let mut catalog: Vec<CatalogEntry> = Vec::with_capacity(factories.len());

        for (index, factory) in factories.into_iter().enumerate() {
            let module = factory.module_id();
            if catalog.iter().any(|entry| entry.module == module) {
                log_warn!("Duplicate module {} ignored", module);
                continue;
            }

            let priority = config
                .setting(&module)
                .map(|setting| setting.priority)
                .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX));
            catalog.push(CatalogEntry {
                module,
                factory,
                priority,
            });
        }

        catalog.sort_by_key(|entry| entry.priority);

        let registry = Self {
            catalog,
            loaded: DashMap::new(),
        };

        for entry in &registry.catalog {
            let enabled = config
                .setting(&entry.module)
                .map(|setting| setting.enabled)
                .unwrap_or(true);
            if !enabled {
                log_debug!("Module {} disabled by configuration", entry.module);
                continue;
            }

            if let Err(e) = registry.load(entry, LoadScope::Full) {
                LogContext::error_with_context(
                    &e,
                    &format!("Failed to load module {}", entry.module),
                );
            }
        }

        log_info!(
            "Module registry initialized: {} of {} modules enabled",
            registry.enabled_modules().len(),
            registry.catalog.len()
        );

        registry
    }

    /// Build the registry from the configuration named by the environment
    pub fn from_env(factories: Vec<Arc<dyn ModuleFactory>>) -> AppResult<Self> {
        let config = ModuleConfig::from_env()?;
        Ok(Self::new(factories, &config))
    }

    /// Enabled modules, in search order
    pub fn enabled_modules(&self) -> Vec<ModuleId> {
        self.catalog
            .iter()
            .filter(|entry| self.is_enabled(&entry.module))
            .map(|entry| entry.module.clone())
            .collect()
    }

    pub fn is_enabled(&self, module: &ModuleId) -> bool {
        self.loaded
            .get(module)
            .is_some_and(|loaded| loaded.scope == LoadScope::Full)
    }

    pub fn module_states(&self) -> Vec<ModuleStatus> {
        self.catalog
            .iter()
            .map(|entry| ModuleStatus {
                module: entry.module.clone(),
                priority: entry.priority,
                loaded: self.loaded.get(&entry.module).map(|loaded| loaded.scope),
            })
            .collect()
    }

    fn catalog_entry(&self, module: &ModuleId) -> AppResult<&CatalogEntry> {
        self.catalog
            .iter()
            .find(|entry| &entry.module == module)
            .ok_or_else(|| AppError::NotFound(format!("Module {} is not registered", module)))
    }

    /// Instantiate `entry` in `scope` unless an equal or wider scope is
    /// already loaded. The shard lock is held while the factory runs, so two
    /// racing callers never instantiate the same module twice.
    fn load(&self, entry: &CatalogEntry, scope: LoadScope) -> AppResult<()> {
        let create = || -> AppResult<LoadedModule> {
            let handlers = entry.factory.create_handlers(scope)?.restricted_to(scope);
            log_debug!(
                "Module {} instantiated ({:?}): {:?}",
                entry.module, scope, handlers
            );
            Ok(LoadedModule { scope, handlers })
        };

        match self.loaded.entry(entry.module.clone()) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get().scope;
                if current == scope || current == LoadScope::Full {
                    return Ok(());
                }
                occupied.insert(create()?);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(create()?);
            }
        }

        log_info!("Module {} loaded ({:?})", entry.module, scope);
        Ok(())
    }

    fn handler<H: ?Sized>(
        &self,
        module: &ModuleId,
        pick: impl Fn(&ModuleHandlers) -> Option<Arc<H>>,
    ) -> Option<Arc<H>> {
        self.loaded
            .get(module)
            .and_then(|loaded| pick(&loaded.handlers))
    }

    fn searchers<H: ?Sized>(
        &self,
        pick: impl Fn(&ModuleHandlers) -> Option<Arc<H>>,
    ) -> Vec<Registered<H>> {
        self.catalog
            .iter()
            .filter_map(|entry| {
                let loaded = self.loaded.get(&entry.module)?;
                if loaded.scope != LoadScope::Full {
                    return None;
                }
                pick(&loaded.handlers).map(|handler| Registered::new(entry.module.clone(), handler))
            })
            .collect()
    }
}

impl ProviderRegistry for ModuleRegistry {
    fn anime_searchers(&self) -> Vec<Registered<AnimeSearcher>> {
        self.searchers(|handlers| handlers.anime_searcher.clone())
    }

    fn danmaku_searchers(&self) -> Vec<Registered<DanmakuSearcher>> {
        self.searchers(|handlers| handlers.danmaku_searcher.clone())
    }

    fn anime_detail_parser(&self, module: &ModuleId) -> Option<Arc<dyn AnimeDetailParser>> {
        self.handler(module, |handlers| handlers.anime_detail_parser.clone())
    }

    fn anime_url_parser(&self, module: &ModuleId) -> Option<Arc<dyn AnimeUrlParser>> {
        self.handler(module, |handlers| handlers.anime_url_parser.clone())
    }

    fn danmaku_detail_parser(&self, module: &ModuleId) -> Option<Arc<dyn DanmakuDetailParser>> {
        self.handler(module, |handlers| handlers.danmaku_detail_parser.clone())
    }

    fn danmaku_data_parser(&self, module: &ModuleId) -> Option<Arc<dyn DanmakuDataParser>> {
        self.handler(module, |handlers| handlers.danmaku_data_parser.clone())
    }

    fn anime_proxy_class(&self, module: &ModuleId) -> Option<Arc<dyn AnimeProxyClass>> {
        self.handler(module, |handlers| handlers.anime_proxy_class.clone())
    }

    fn load_utils_module(&self, module: &ModuleId) -> AppResult<()> {
        let entry = self.catalog_entry(module)?;
        self.load(entry, LoadScope::UtilsOnly)
    }

    fn change_module_state(&self, module: &ModuleId, enable: bool) -> AppResult<()> {
        let entry = self.catalog_entry(module)?;

        if enable {
            return self.load(entry, LoadScope::Full);
        }

        if self
            .loaded
            .remove_if(module, |_, loaded| loaded.scope == LoadScope::Full)
            .is_some()
        {
            log_info!("Module {} disabled", module);
        }
        Ok(())
    }
}
