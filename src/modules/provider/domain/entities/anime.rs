use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::value_objects::ModuleId;

/// One anime search hit, produced by a module's searcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeMeta {
    pub title: String,
    pub cover_url: String,
    pub category: String,
    pub description: String,
    /// Locator handed to the detail parser
    pub detail_url: String,
    /// Module that produced this hit
    pub module: ModuleId,
}

impl AnimeMeta {
    pub fn new(module: ModuleId, title: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cover_url: String::new(),
            category: String::new(),
            description: String::new(),
            detail_url: detail_url.into(),
            module,
        }
    }
}

/// One playable episode; `raw_url` usually still needs url parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub name: String,
    pub raw_url: String,
    pub module: ModuleId,
}

impl Anime {
    pub fn new(module: ModuleId, name: impl Into<String>, raw_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_url: raw_url.into(),
            module,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimePlayList {
    pub name: String,
    pub items: Vec<Anime>,
}

/// Parsed anime detail page. `AnimeDetail::default()` is the "not found" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub title: String,
    pub cover_url: String,
    pub description: String,
    pub category: String,
    pub module: Option<ModuleId>,
    pub playlists: Vec<AnimePlayList>,
}

impl AnimeDetail {
    pub fn is_empty(&self) -> bool {
        self.playlists.iter().all(|list| list.items.is_empty())
    }

    pub fn episode_count(&self) -> usize {
        self.playlists.iter().map(|list| list.items.len()).sum()
    }
}

/// Direct link resolved from an episode's raw url
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeInfo {
    pub real_url: String,
    /// Container format hint, e.g. `mp4` or `hls`
    pub format: String,
    /// Size in bytes when the provider reports one
    pub size: Option<u64>,
    /// Seconds the link stays valid, when known
    pub lifetime: Option<u64>,
}

impl AnimeInfo {
    pub fn new(real_url: impl Into<String>) -> Self {
        Self {
            real_url: real_url.into(),
            ..Self::default()
        }
    }

    pub fn is_available(&self) -> bool {
        !self.real_url.trim().is_empty()
    }
}
