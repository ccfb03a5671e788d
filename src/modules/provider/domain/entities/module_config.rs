use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::modules::provider::domain::value_objects::ModuleId;
use crate::shared::errors::AppResult;

/// Environment variable pointing at the module configuration file
pub const MODULE_CONFIG_PATH_ENV: &str = "MODULE_CONFIG_PATH";

/// Enable state and ordering of one provider module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSetting {
    pub module: ModuleId,
    pub enabled: bool,
    /// Priority order (lower = searched earlier)
    #[serde(default)]
    pub priority: u32,
}

impl ModuleSetting {
    pub fn new(module: ModuleId, enabled: bool, priority: u32) -> Self {
        Self {
            module,
            enabled,
            priority,
        }
    }
}

/// Module configuration. Modules not listed here fall back to enabled with
/// their catalog position as priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default)]
    pub modules: Vec<ModuleSetting>,
}

impl ModuleConfig {
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Read the file named by `MODULE_CONFIG_PATH`. Without that variable
    /// the default (empty) configuration is used.
    pub fn from_env() -> AppResult<Self> {
        match std::env::var(MODULE_CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn setting(&self, module: &ModuleId) -> Option<&ModuleSetting> {
        self.modules.iter().find(|s| &s.module == module)
    }

    pub fn with_module(mut self, module: ModuleId, enabled: bool, priority: u32) -> Self {
        self.modules.retain(|s| s.module != module);
        self.modules
            .push(ModuleSetting::new(module, enabled, priority));
        self
    }
}
