use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::value_objects::ModuleId;

/// One danmaku library search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanmakuMeta {
    pub title: String,
    /// Locator handed to the detail parser
    pub play_url: String,
    /// Number of episodes in the library
    pub num: u32,
    pub module: ModuleId,
}

impl DanmakuMeta {
    pub fn new(module: ModuleId, title: impl Into<String>, play_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            play_url: play_url.into(),
            num: 0,
            module,
        }
    }
}

/// Danmaku track of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Danmaku {
    pub name: String,
    /// Track id understood by the module's data parser
    pub cid: String,
    pub module: ModuleId,
}

impl Danmaku {
    pub fn new(module: ModuleId, name: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cid: cid.into(),
            module,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DanmakuCollection {
    pub name: String,
    pub items: Vec<Danmaku>,
}

/// Parsed danmaku library. `DanmakuDetail::default()` is the "not found" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DanmakuDetail {
    pub title: String,
    pub module: Option<ModuleId>,
    pub collections: Vec<DanmakuCollection>,
}

impl DanmakuDetail {
    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(|c| c.items.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanmakuPosition {
    #[default]
    Scroll,
    Top,
    Bottom,
}

/// A single bullet comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanmakuItem {
    /// Offset from the start of the episode, in seconds
    pub time: f32,
    pub position: DanmakuPosition,
    /// RGB color packed as `0xRRGGBB`
    pub color: u32,
    pub text: String,
}

/// Decoded danmaku payload of one episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DanmakuData {
    pub items: Vec<DanmakuItem>,
}

impl DanmakuData {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
