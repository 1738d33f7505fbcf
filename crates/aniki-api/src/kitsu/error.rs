//! Failure envelope and failure handlers.
//!
//! Operations never return errors. Every failure is delivered to a
//! [`FailureHandler`] together with a status code, and the operation
//! resolves to `None`.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Status reported alongside local validation failures.
pub const VALIDATION_STATUS: u16 = 400;

/// Status reported when no HTTP response was received.
pub const NO_RESPONSE_STATUS: u16 = 0;

/// One entry of a JSON:API `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitsuApiError {
    /// Short summary.
    pub title: String,
    /// Longer explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Application-specific code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// HTTP status, as a string.
    pub status: String,
}

/// JSON:API error document returned on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitsuErrorDocument {
    /// Reported errors.
    pub errors: Vec<KitsuApiError>,
}

impl fmt::Display for KitsuErrorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("no error details");
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&error.title)?;
            if let Some(detail) = &error.detail {
                write!(f, " ({detail})")?;
            }
        }
        Ok(())
    }
}

/// A failed operation. Exactly one channel is populated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KitsuFailure {
    /// The API answered with a non-2xx status and an error document.
    #[error("Kitsu API error: {0}")]
    Api(KitsuErrorDocument),
    /// Failure detected by this library: invalid arguments, or a response
    /// that could not be read or decoded.
    #[error("{0}")]
    Module(String),
}

impl KitsuFailure {
    /// The remote error document, if this is an API failure.
    #[must_use]
    pub const fn api_error(&self) -> Option<&KitsuErrorDocument> {
        match self {
            Self::Api(doc) => Some(doc),
            Self::Module(_) => None,
        }
    }

    /// The local diagnostic, if this is a module failure.
    #[must_use]
    pub fn module_error(&self) -> Option<&str> {
        match self {
            Self::Api(_) => None,
            Self::Module(msg) => Some(msg),
        }
    }
}

type HandlerFn = dyn Fn(KitsuFailure, u16) -> BoxFuture<'static, ()> + Send + Sync;

/// Callback that receives failures and their status code.
///
/// Cheap to clone. The dispatcher awaits the returned future and ignores
/// everything else about it.
#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FailureHandler {
    inner: Arc<HandlerFn>,
}

impl FailureHandler {
    /// Wraps an async callback.
    ///
    /// ```
    /// use aniki_api::kitsu::FailureHandler;
    ///
    /// let handler = FailureHandler::new(|failure, status| async move {
    ///     tracing::warn!(status, "lookup failed: {failure}");
    /// });
    /// # drop(handler);
    /// ```
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn(KitsuFailure, u16) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |failure: KitsuFailure, status: u16| {
                callback(failure, status).boxed()
            }),
        }
    }

    /// The default handler: logs both channels at `ERROR`.
    #[must_use]
    pub fn log() -> Self {
        Self::new(|failure, status| async move { log_unhandled(&failure, status) })
    }

    /// Invokes the handler.
    pub async fn call(&self, failure: KitsuFailure, status: u16) {
        (self.inner)(failure, status).await;
    }
}

impl Default for FailureHandler {
    fn default() -> Self {
        Self::log()
    }
}

impl fmt::Debug for FailureHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureHandler").finish_non_exhaustive()
    }
}

/// Logs a failure nobody handled.
fn log_unhandled(failure: &KitsuFailure, status: u16) {
    match failure {
        KitsuFailure::Api(doc) => {
            tracing::error!(status, errors = ?doc.errors, "Unhandled Kitsu API error: {doc}");
        }
        KitsuFailure::Module(msg) => {
            tracing::error!(status, "Unhandled error: {msg}");
        }
    }
}

/// Failures captured by [`recording_handler`].
#[cfg(test)]
pub(crate) type Recorded = Arc<tokio::sync::Mutex<Vec<(KitsuFailure, u16)>>>;

/// Handler that records every call, for assertions in tests.
#[cfg(test)]
pub(crate) fn recording_handler() -> (FailureHandler, Recorded) {
    let seen: Recorded = Arc::default();
    let sink = Arc::clone(&seen);
    let handler = FailureHandler::new(move |failure, status| {
        let sink = Arc::clone(&sink);
        async move {
            sink.lock().await.push((failure, status));
        }
    });
    (handler, seen)
}
