//! `KitsuClient` - HTTP transport and failure dispatch.

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::encoder::EncodedQuery;
use super::error::{
    FailureHandler, KitsuErrorDocument, KitsuFailure, NO_RESPONSE_STATUS, VALIDATION_STATUS,
};
use super::resource::{AnimeKitsu, MangaKitsu, ResourceQuery};

/// Default base URL for the Kitsu edge API.
const DEFAULT_BASE_URL: &str = "https://kitsu.app/api/edge/";

/// JSON:API media type, sent as both `Content-Type` and `Accept`.
const JSON_API: &str = "application/vnd.api+json";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("aniki/", env!("CARGO_PKG_VERSION"));

/// Maximum characters of a non-JSON:API error body kept in the diagnostic.
const BODY_PREVIEW_CHARS: usize = 200;

/// Kitsu API client.
///
/// Owns the connection pool and the fallback [`FailureHandler`]. Cloning is
/// cheap; the façades returned by [`anime`](Self::anime) and
/// [`manga`](Self::manga) hold a clone.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct KitsuClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests, always ending in `/`.
    base_url: Url,
    /// Handler used when a call does not supply its own.
    failure_handler: FailureHandler,
}

/// Builder for `KitsuClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct KitsuClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    failure_handler: Option<FailureHandler>,
}

impl KitsuClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            failure_handler: None,
        }
    }

    /// Overrides the base URL (mirrors or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `aniki/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the fallback failure handler (default: [`FailureHandler::log`]).
    #[must_use]
    pub fn failure_handler(mut self, handler: FailureHandler) -> Self {
        self.failure_handler = Some(handler);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - The default base URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<KitsuClient> {
        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(KitsuClient {
            http_client,
            base_url,
            failure_handler: self.failure_handler.unwrap_or_default(),
        })
    }
}

/// A failure and the status it is reported with.
type Failed = (KitsuFailure, u16);

impl KitsuClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> KitsuClientBuilder {
        KitsuClientBuilder::new()
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Anime and episode queries.
    #[must_use]
    pub fn anime(&self) -> AnimeKitsu {
        ResourceQuery::new(self.clone())
    }

    /// Manga and chapter queries.
    #[must_use]
    pub fn manga(&self) -> MangaKitsu {
        ResourceQuery::new(self.clone())
    }

    /// Sends one GET and decodes the body as `T`.
    ///
    /// Any failure goes to `handler` (or the client's fallback) and the call
    /// resolves to `None`.
    #[instrument(skip_all)]
    pub(crate) async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&EncodedQuery>,
        handler: Option<&FailureHandler>,
    ) -> Option<T> {
        match self.get_json(path, query).await {
            Ok(document) => Some(document),
            Err((failure, status)) => {
                self.handler(handler).call(failure, status).await;
                None
            }
        }
    }

    /// Reports a local validation failure without touching the network.
    pub(crate) async fn reject(&self, handler: Option<&FailureHandler>, message: String) {
        tracing::debug!(%message, "Kitsu request rejected before sending");
        self.handler(handler)
            .call(KitsuFailure::Module(message), VALIDATION_STATUS)
            .await;
    }

    fn handler<'a>(&'a self, handler: Option<&'a FailureHandler>) -> &'a FailureHandler {
        handler.unwrap_or(&self.failure_handler)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&EncodedQuery>,
    ) -> Result<T, Failed> {
        let url = self.base_url.join(path).map_err(|e| {
            module(
                format!("failed to join URL path {path}: {e}"),
                NO_RESPONSE_STATUS,
            )
        })?;

        let mut request = self
            .http_client
            .get(url)
            .header(CONTENT_TYPE, JSON_API)
            .header(ACCEPT, JSON_API);
        if let Some(query) = query {
            request = request.query(&query.as_pairs());
        }
        let request = request
            .build()
            .map_err(|e| module(format!("failed to build request: {e}"), NO_RESPONSE_STATUS))?;

        tracing::debug!(url = %request.url(), "Kitsu API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| module(format!("request failed: {path}: {e}"), NO_RESPONSE_STATUS))?;

        let status = response.status();
        let code = status.as_u16();
        tracing::debug!(status = code, "Kitsu API response");

        let body = response
            .text()
            .await
            .map_err(|e| module(format!("failed to read response body: {path}: {e}"), code))?;

        if !status.is_success() {
            if let Ok(document) = serde_json::from_str::<KitsuErrorDocument>(&body) {
                return Err((KitsuFailure::Api(document), code));
            }
            let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            return Err(module(
                format!("Kitsu API error (HTTP {status}): {preview}"),
                code,
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| module(format!("failed to decode JSON response: {path}: {e}"), code))
    }
}

const fn module(message: String, status: u16) -> Failed {
    (KitsuFailure::Module(message), status)
}
