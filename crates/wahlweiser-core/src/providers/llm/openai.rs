use super::{ChatRequest, LlmClient, LlmResponse};
use crate::errors::ProviderError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const USER_AGENT_VALUE: &str = concat!("wahlweiser/", env!("CARGO_PKG_VERSION"));

pub struct OpenAIClient {
    pub model: String,
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ProviderError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn body(&self, request: &ChatRequest) -> serde_json::Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
        });
        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                after: self.timeout,
            }
        } else {
            ProviderError::from(err)
        }
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, ProviderError> {
        let url = self.endpoint();
        crate::providers::network::check_outbound(&url)?;
        debug!(url = %url, model = %self.model, "sending chat completion");

        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        match status.as_u16() {
            200..=299 => {}
            401 | 403 => {
                let message = resp.text().await.unwrap_or_else(|_| status.to_string());
                return Err(ProviderError::Unauthorized {
                    status: status.as_u16(),
                    message,
                });
            }
            429 => {
                let retry_after = resp
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);
                return Err(ProviderError::RateLimited { retry_after });
            }
            _ => {
                let message = resp.text().await.unwrap_or_else(|_| status.to_string());
                return Err(ProviderError::Server {
                    status: status.as_u16(),
                    message,
                });
            }
        }

        let raw = resp.text().await.map_err(|e| self.map_send_error(e))?;
        let envelope: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| ProviderError::MalformedEnvelope {
                message: format!("response is not JSON: {}", e),
                body: raw.clone(),
            })?;

        let text = envelope
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProviderError::MalformedEnvelope {
                message: "response missing choices[0].message.content".to_string(),
                body: raw.clone(),
            })?
            .to_string();

        let model = envelope
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or(self.model.as_str())
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model,
            meta: json!({
                "usage": envelope.get("usage").cloned().unwrap_or(serde_json::Value::Null),
                "finish_reason": envelope.pointer("/choices/0/finish_reason").cloned(),
            }),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
