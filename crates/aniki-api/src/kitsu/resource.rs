//! Generic resource client shared by the anime and manga façades.
//!
//! A [`ResourceKind`] names one top-level collection, its child resource and
//! the types that flow through them. [`ResourceQuery`] implements the four
//! lookups once for every kind.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::client::KitsuClient;
use super::encoder::EncodeQuery;
use super::error::FailureHandler;
use super::params::{AnimeParams, MangaParams, ResourceId};
use super::types::{
    AnimeAttributes, ChapterAttributes, Collection, EpisodeAttributes, MangaAttributes, Single,
};

/// Static description of a top-level resource.
pub trait ResourceKind {
    /// Name used in diagnostics (`anime`, `manga`).
    const LABEL: &'static str;
    /// Collection path relative to the base URL.
    const COLLECTION_PATH: &'static str;
    /// Child resource path relative to the base URL.
    const CHILD_PATH: &'static str;
    /// Name of the child lookup in diagnostics.
    const CHILD_OP: &'static str;

    /// Query parameters accepted by `find` and `list`.
    type Params: EncodeQuery + Sync;
    /// Attributes of the top-level resource.
    type Attributes: DeserializeOwned + Default + Send;
    /// Attributes of the child resource.
    type ChildAttributes: DeserializeOwned + Default + Send;
}

/// `anime` resources with `episodes` children.
#[derive(Debug, Clone, Copy)]
pub enum Anime {}

impl ResourceKind for Anime {
    const LABEL: &'static str = "anime";
    const COLLECTION_PATH: &'static str = "anime";
    const CHILD_PATH: &'static str = "episodes";
    const CHILD_OP: &'static str = "episode";

    type Params = AnimeParams;
    type Attributes = AnimeAttributes;
    type ChildAttributes = EpisodeAttributes;
}

/// `manga` resources with `chapters` children.
#[derive(Debug, Clone, Copy)]
pub enum Manga {}

impl ResourceKind for Manga {
    const LABEL: &'static str = "manga";
    const COLLECTION_PATH: &'static str = "manga";
    const CHILD_PATH: &'static str = "chapters";
    const CHILD_OP: &'static str = "chapters";

    type Params = MangaParams;
    type Attributes = MangaAttributes;
    type ChildAttributes = ChapterAttributes;
}

/// Queries against one resource kind.
pub struct ResourceQuery<R> {
    client: KitsuClient,
    kind: PhantomData<fn() -> R>,
}

/// Anime query façade.
pub type AnimeKitsu = ResourceQuery<Anime>;

/// Manga query façade.
pub type MangaKitsu = ResourceQuery<Manga>;

impl<R> Clone for ResourceQuery<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: ResourceKind> fmt::Debug for ResourceQuery<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceQuery")
            .field("kind", &R::LABEL)
            .field("client", &self.client)
            .finish()
    }
}

impl<R> ResourceQuery<R> {
    pub(crate) const fn new(client: KitsuClient) -> Self {
        Self {
            client,
            kind: PhantomData,
        }
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &KitsuClient {
        &self.client
    }
}

impl<R: ResourceKind> ResourceQuery<R> {
    /// Searches the collection. A missing or empty query is rejected locally.
    pub(crate) async fn find_resources(
        &self,
        params: &R::Params,
        handler: Option<&FailureHandler>,
    ) -> Option<Collection<R::Attributes>> {
        if params.search_text().is_none_or(str::is_empty) {
            let message = format!("`query` in {} find is empty", R::LABEL);
            self.client.reject(handler, message).await;
            return None;
        }
        let query = params.encode();
        self.client
            .dispatch(R::COLLECTION_PATH, Some(&query), handler)
            .await
    }

    /// Lists the collection with optional filters.
    pub(crate) async fn list_resources(
        &self,
        params: &R::Params,
        handler: Option<&FailureHandler>,
    ) -> Option<Collection<R::Attributes>> {
        let query = params.encode();
        self.client
            .dispatch(R::COLLECTION_PATH, Some(&query), handler)
            .await
    }

    /// Fetches one resource by id.
    pub(crate) async fn find_resource(
        &self,
        id: &ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<Single<R::Attributes>> {
        let operation = format!("{} find_by_id", R::LABEL);
        let path = format!("{}/", R::COLLECTION_PATH);
        self.lookup(&path, &operation, id, handler).await
    }

    /// Fetches one child resource by id.
    pub(crate) async fn find_child(
        &self,
        id: &ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<Single<R::ChildAttributes>> {
        let operation = format!("{} {}", R::LABEL, R::CHILD_OP);
        let path = format!("{}/", R::CHILD_PATH);
        self.lookup(&path, &operation, id, handler).await
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        prefix: &str,
        operation: &str,
        id: &ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<T> {
        match id.validate(operation) {
            Ok(id) => {
                let path = format!("{prefix}{id}");
                self.client.dispatch(&path, None, handler).await
            }
            Err(message) => {
                self.client.reject(handler, message).await;
                None
            }
        }
    }
}
