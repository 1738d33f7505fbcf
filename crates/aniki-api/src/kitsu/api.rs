//! `AnimeApi` and `MangaApi` trait definitions.
#![allow(clippy::future_not_send)]

use super::error::FailureHandler;
use super::params::{AnimeParams, MangaParams, ResourceId};
use super::types::{AnimeCollection, AnimeSingle, Chapter, Episode, MangaCollection, MangaSingle};

/// Anime query API.
///
/// Every operation resolves to `None` after reporting a failure to
/// `handler`, or to the client's fallback handler when `handler` is `None`.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(AnimeApi: Send)]
pub trait LocalAnimeApi {
    /// Searches anime by text. Requires a non-empty `params.query`.
    async fn find(
        &self,
        params: &AnimeParams,
        handler: Option<&FailureHandler>,
    ) -> Option<AnimeCollection>;

    /// Lists anime, optionally filtered.
    async fn list(
        &self,
        params: &AnimeParams,
        handler: Option<&FailureHandler>,
    ) -> Option<AnimeCollection>;

    /// Fetches one anime.
    async fn find_by_id(
        &self,
        id: ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<AnimeSingle>;

    /// Fetches one episode.
    async fn episode(&self, id: ResourceId, handler: Option<&FailureHandler>) -> Option<Episode>;
}

/// Manga query API.
///
/// Same failure contract as [`LocalAnimeApi`].
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MangaApi: Send)]
pub trait LocalMangaApi {
    /// Searches manga by text. Requires a non-empty `params.query`.
    async fn find(
        &self,
        params: &MangaParams,
        handler: Option<&FailureHandler>,
    ) -> Option<MangaCollection>;

    /// Lists manga, optionally filtered.
    async fn list(
        &self,
        params: &MangaParams,
        handler: Option<&FailureHandler>,
    ) -> Option<MangaCollection>;

    /// Fetches one manga.
    async fn find_by_id(
        &self,
        id: ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<MangaSingle>;

    /// Fetches one chapter.
    async fn chapters(&self, id: ResourceId, handler: Option<&FailureHandler>) -> Option<Chapter>;
}
