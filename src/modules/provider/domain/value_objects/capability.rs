use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece of functionality a provider module may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Keyword search over anime
    AnimeSearch,
    /// Keyword search over danmaku libraries
    DanmakuSearch,
    /// Anime detail page parsing
    AnimeDetail,
    /// Raw episode url to direct link resolution
    AnimeUrl,
    /// Danmaku library detail parsing
    DanmakuDetail,
    /// Danmaku payload decoding
    DanmakuData,
    /// Video proxy descriptor
    AnimeProxy,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::AnimeSearch => "anime searcher",
            Capability::DanmakuSearch => "danmaku searcher",
            Capability::AnimeDetail => "anime detail parser",
            Capability::AnimeUrl => "anime url parser",
            Capability::DanmakuDetail => "danmaku detail parser",
            Capability::DanmakuData => "danmaku data parser",
            Capability::AnimeProxy => "anime proxy",
        };
        write!(f, "{}", name)
    }
}
