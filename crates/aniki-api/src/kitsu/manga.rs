//! Manga query façade.

use tracing::instrument;

use super::api::MangaApi;
use super::error::FailureHandler;
use super::params::{MangaParams, ResourceId};
use super::resource::MangaKitsu;
use super::types::{Chapter, MangaCollection, MangaSingle};

impl MangaApi for MangaKitsu {
    #[instrument(skip_all)]
    async fn find(
        &self,
        params: &MangaParams,
        handler: Option<&FailureHandler>,
    ) -> Option<MangaCollection> {
        self.find_resources(params, handler).await
    }

    #[instrument(skip_all)]
    async fn list(
        &self,
        params: &MangaParams,
        handler: Option<&FailureHandler>,
    ) -> Option<MangaCollection> {
        self.list_resources(params, handler).await
    }

    #[instrument(skip_all)]
    async fn find_by_id(
        &self,
        id: ResourceId,
        handler: Option<&FailureHandler>,
    ) -> Option<MangaSingle> {
        self.find_resource(&id, handler).await
    }

    #[instrument(skip_all)]
    async fn chapters(&self, id: ResourceId, handler: Option<&FailureHandler>) -> Option<Chapter> {
        self.find_child(&id, handler).await
    }
}
