//! Evaluator configuration.
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `OPENAI_API_KEY` | Credential for the OpenAI provider (required for `openai`) |
//! | `OPENAI_BASE_URL` | API base URL (default: `https://api.openai.com/v1`) |
//! | `WAHLWEISER_MODEL` | Chat model (default: `gpt-3.5-turbo`) |
//! | `WAHLWEISER_TIMEOUT_SECS` | Upper bound for one evaluation (default: 30) |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::providers::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::providers::llm::{LlmClient, OpenAIClient, ScriptedClient, TracingLlmClient};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "WAHLWEISER_MODEL";
pub const TIMEOUT_ENV: &str = "WAHLWEISER_TIMEOUT_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    /// Scripted replies, no network.
    Fake,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "fake" => Ok(Self::Fake),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenAi => "openai",
            Self::Fake => "fake",
        })
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature. Zero keeps replies deterministic.
    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl fmt::Debug for EvaluatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatorConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl EvaluatorConfig {
    /// Defaults overlaid with whatever the environment sets.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty(API_KEY_ENV),
            base_url: non_empty(BASE_URL_ENV).unwrap_or_else(default_base_url),
            model: non_empty(MODEL_ENV).unwrap_or_else(default_model),
            timeout_secs: non_empty(TIMEOUT_ENV)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or_else(default_timeout_secs),
            ..Self::default()
        }
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "model",
                message: "must not be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid {
                field: "temperature",
                message: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if self.provider == ProviderKind::OpenAi
            && self.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(ConfigError::MissingApiKey { env: API_KEY_ENV });
        }
        Ok(())
    }

    /// Build the configured provider client, wrapped for tracing.
    ///
    /// `fake_replies` only feeds the `fake` provider.
    pub fn build_client(&self, fake_replies: &[String]) -> Result<Arc<dyn LlmClient>, ConfigError> {
        self.validate()?;
        let inner: Arc<dyn LlmClient> = match self.provider {
            ProviderKind::OpenAi => {
                let key = self
                    .api_key
                    .clone()
                    .ok_or(ConfigError::MissingApiKey { env: API_KEY_ENV })?;
                let client =
                    OpenAIClient::new(&self.model, key, &self.base_url, self.timeout()).map_err(
                        |e| ConfigError::Invalid {
                            field: "http client",
                            message: e.to_string(),
                        },
                    )?;
                Arc::new(client)
            }
            ProviderKind::Fake => {
                Arc::new(ScriptedClient::new(&self.model).with_replies(fake_replies.iter().cloned()))
            }
        };
        Ok(Arc::new(TracingLlmClient::new(inner)))
    }
}
