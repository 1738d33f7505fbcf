//! Anime query façade.

use tracing::instrument;

use super::api::AnimeApi;
use super::error::FailureHandler;
use super::params::{AnimeParams, ResourceId};
use super::resource::AnimeKitsu;
use super::types::{AnimeCollection, AnimeSingle, Episode};

impl AnimeApi for AnimeKitsu {
    #[instrument(skip_all)]
    async fn find(
        &self,
        params: &AnimeParams,
        handler: Option<&FailureHandler>,
    ) -> Option<AnimeCollection> {
        self.find_resources(params, handler).await
    }

    #[instrument(skip_all)]
    async fn list(
        &self,
        params: &AnimeParams,
        handler: Option<&FailureHandler>,
    ) -> Option<AnimeCollection> {
        self.list_resources(params, handler).await
    }

    #[instrument(skip_all)]
    async fn find_by_id(
        &self,
        id: ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<AnimeSingle> {
        self.find_resource(&id, handler).await
    }

    #[instrument(skip_all)]
    async fn episode(&self, id: ResourceId, handler: Option<&FailureHandler>) -> Option<Episode> {
        self.find_child(&id, handler).await
    }
}
