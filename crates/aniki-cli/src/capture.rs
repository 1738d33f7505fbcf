//! Per-call failure capture.
//!
//! The library reports failures through a handler and resolves to `None`.
//! The CLI wants a non-zero exit instead, so each command passes a handler
//! that stores the failure and turns it back into an error afterwards.

use std::sync::Arc;

use aniki_api::kitsu::{FailureHandler, KitsuFailure};
use anyhow::{Result, bail};
use tokio::sync::Mutex;

/// Slot shared between a [`Capture`] and its handler.
type Slot = Arc<Mutex<Option<(KitsuFailure, u16)>>>;

/// Handler that keeps the last reported failure.
#[derive(Debug, Clone)]
pub struct Capture {
    handler: FailureHandler,
    slot: Slot,
}

impl Capture {
    /// Creates an empty capture.
    pub fn new() -> Self {
        let slot: Slot = Arc::default();
        let sink = Arc::clone(&slot);
        let handler = FailureHandler::new(move |failure, status| {
            let sink = Arc::clone(&sink);
            async move {
                tracing::debug!(status, "Kitsu call failed: {failure}");
                *sink.lock().await = Some((failure, status));
            }
        });
        Self { handler, slot }
    }

    /// The handler to pass to a library call.
    pub const fn handler(&self) -> &FailureHandler {
        &self.handler
    }

    /// Converts a call result into `Result`, using the captured failure.
    ///
    /// # Errors
    ///
    /// Returns the captured failure (with its status) when `value` is `None`.
    pub async fn finish<T>(self, value: Option<T>) -> Result<T> {
        if let Some(value) = value {
            return Ok(value);
        }
        match self.slot.lock().await.take() {
            Some((failure, status)) => bail!("{failure} (status {status})"),
            None => bail!("Kitsu request returned no data"),
        }
    }
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn test_finish_passes_value_through() {
        // Arrange
        let capture = Capture::new();

        // Act
        let result = capture.finish(Some(42)).await;

        // Assert
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_finish_reports_captured_failure() {
        // Arrange
        let capture = Capture::new();
        capture
            .handler()
            .call(
                KitsuFailure::Module(String::from("`query` in anime find is empty")),
                400,
            )
            .await;

        // Act
        let result = capture.finish::<()>(None).await;

        // Assert
        assert_eq!(
            result.unwrap_err().to_string(),
            "`query` in anime find is empty (status 400)"
        );
    }

    #[tokio::test]
    async fn test_finish_without_failure() {
        // Arrange
        let capture = Capture::new();

        // Act
        let result = capture.finish::<()>(None).await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("no data"));
    }
}
