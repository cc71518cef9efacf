use super::{ChatRequest, LlmClient, LlmResponse};
use crate::errors::ProviderError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a client in an `llm.request` span.
///
/// The statement itself is never recorded; only its length is.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, ProviderError> {
        let span = info_span!(
            "llm.request",
            "llm.provider" = self.inner.provider_name(),
            "llm.request.model" = self.inner.model(),
            "llm.request.temperature" = f64::from(request.temperature),
            "llm.request.json_mode" = request.json_mode,
            "llm.request.chars" = request.user.chars().count(),
            "llm.response.model" = tracing::field::Empty,
            "llm.response.chars" = tracing::field::Empty,
            "llm.latency_ms" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete(request).await;
            let span = tracing::Span::current();
            span.record("llm.latency_ms", start.elapsed().as_millis() as u64);

            match &result {
                Ok(resp) => {
                    span.record("llm.response.model", resp.model.as_str());
                    span.record("llm.response.chars", resp.text.chars().count());
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}
