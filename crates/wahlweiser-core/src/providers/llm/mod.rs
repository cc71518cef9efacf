pub mod fake;
pub mod openai;
pub mod tracing;

use async_trait::async_trait;

use crate::errors::ProviderError;

pub use fake::ScriptedClient;
pub use openai::OpenAIClient;
pub use self::tracing::TracingLlmClient;

/// One chat completion: a system instruction plus a single user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// Ask the provider to constrain its reply to a JSON object.
    pub json_mode: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub meta: serde_json::Value,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, ProviderError>;

    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;
}
