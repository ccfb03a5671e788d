use crate::modules::provider::domain::{
    AnimeDetail, AnimeInfo, AnimeMeta, DanmakuData, DanmakuDetail, DanmakuMeta,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Keyword search implemented by a provider module.
///
/// The returned stream is lazy and owned: nothing is fetched until it is
/// polled, and dropping it cancels the search. An `Err` item ends this
/// module's contribution to a multi-module search.
pub trait MetaSearcher<M>: Send + Sync {
    fn search(&self, keyword: &str) -> BoxStream<'static, AppResult<M>>;
}

/// Anime searchers yield [`AnimeMeta`]
pub type AnimeSearcher = dyn MetaSearcher<AnimeMeta>;

/// Danmaku searchers yield [`DanmakuMeta`]
pub type DanmakuSearcher = dyn MetaSearcher<DanmakuMeta>;

#[async_trait]
pub trait AnimeDetailParser: Send + Sync {
    /// Parse the detail page behind [`AnimeMeta::detail_url`]
    async fn parse(&self, detail_url: &str) -> AppResult<AnimeDetail>;
}

#[async_trait]
pub trait AnimeUrlParser: Send + Sync {
    /// Turn an episode's raw url into a direct link
    async fn parse(&self, raw_url: &str) -> AppResult<AnimeInfo>;
}

#[async_trait]
pub trait DanmakuDetailParser: Send + Sync {
    async fn parse(&self, play_url: &str) -> AppResult<DanmakuDetail>;
}

#[async_trait]
pub trait DanmakuDataParser: Send + Sync {
    /// Decode the danmaku payload of one track
    async fn parse(&self, cid: &str) -> AppResult<DanmakuData>;
}

/// Describes how the video proxy must fetch a module's streams.
/// The proxy itself lives outside this crate; it instantiates its
/// per-request worker from this descriptor.
pub trait AnimeProxyClass: Send + Sync {
    fn name(&self) -> &str;

    /// Headers (e.g. `Referer`) the upstream CDN expects
    fn request_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
