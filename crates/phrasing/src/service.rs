//! The phrasing service seam and its wrappers.

use crate::error::PhrasingError;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// One text-generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhrasingRequest {
    pub persona: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can turn a prompt into a bartender's reply.
#[async_trait]
pub trait PhrasingService: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &'static str;

    async fn generate(&self, request: PhrasingRequest) -> Result<String, PhrasingError>;
}

#[async_trait]
impl<P: PhrasingService + ?Sized> PhrasingService for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn generate(&self, request: PhrasingRequest) -> Result<String, PhrasingError> {
        (**self).generate(request).await
    }
}

/// Bounds every call to the inner service by `timeout`.
pub struct TimeoutPhraser<P> {
    inner: P,
    timeout: Duration,
}

impl<P: PhrasingService> TimeoutPhraser<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<P: PhrasingService> PhrasingService for TimeoutPhraser<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn generate(&self, request: PhrasingRequest) -> Result<String, PhrasingError> {
        match tokio::time::timeout(self.timeout, self.inner.generate(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    service = self.inner.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Phrasing request timed out"
                );
                Err(PhrasingError::Timeout(self.timeout))
            }
        }
    }
}

/// Offline phraser that always answers with the same line.
#[derive(Debug, Clone)]
pub struct StaticPhraser {
    reply: String,
}

impl StaticPhraser {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for StaticPhraser {
    fn default() -> Self {
        Self::new("Cheers! Coming right up.")
    }
}

#[async_trait]
impl PhrasingService for StaticPhraser {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn generate(&self, request: PhrasingRequest) -> Result<String, PhrasingError> {
        debug!(persona = %request.persona, "Static phraser reply");
        Ok(self.reply.clone())
    }
}
