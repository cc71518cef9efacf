//! Statement evaluation: one provider call, one strict parse.

mod parse;

pub use parse::parse_scores;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::EvaluatorConfig;
use crate::errors::{EvalError, ProviderError};
use crate::party::{PartyCode, ScoreMap};
use crate::prompt::{PROMPT_VERSION, SYSTEM_PROMPT};
use crate::providers::llm::{ChatRequest, LlmClient};

/// Turns a statement into a per-party score map.
///
/// Cheap to clone; clones share the provider client.
#[derive(Clone)]
pub struct Evaluator {
    client: Arc<dyn LlmClient>,
    temperature: f32,
    timeout: Duration,
}

impl Evaluator {
    pub fn new(client: Arc<dyn LlmClient>, temperature: f32, timeout: Duration) -> Self {
        Self {
            client,
            temperature,
            timeout,
        }
    }

    pub fn from_config(client: Arc<dyn LlmClient>, config: &EvaluatorConfig) -> Self {
        Self::new(client, config.temperature, config.timeout())
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub(crate) fn request(&self, statement: &str) -> ChatRequest {
        ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: statement.to_string(),
            temperature: self.temperature,
            json_mode: true,
        }
    }

    /// Score a statement. Single attempt, no retry.
    ///
    /// The statement is forwarded as-is. Failures never escape as panics; the
    /// error carries whatever raw payload the provider returned.
    pub async fn evaluate(&self, statement: &str) -> Result<ScoreMap, EvalError> {
        let request = self.request(statement);
        debug!(
            provider = self.client.provider_name(),
            model = self.client.model(),
            prompt_version = PROMPT_VERSION,
            "evaluating statement"
        );

        let result = match tokio::time::timeout(self.timeout, self.client.complete(&request)).await
        {
            Ok(Ok(response)) => {
                debug!(raw = %response.text, "provider reply");
                parse_scores(&response.text)
            }
            Ok(Err(ProviderError::MalformedEnvelope { message, body })) => {
                Err(EvalError::parse(message, body))
            }
            Ok(Err(e)) => Err(EvalError::from(e)),
            Err(_elapsed) => Err(EvalError::from(ProviderError::Timeout {
                after: self.timeout,
            })),
        };

        match &result {
            Ok(scores) => info!(
                cdu = scores.get(PartyCode::Cdu),
                spd = scores.get(PartyCode::Spd),
                gruene = scores.get(PartyCode::Gruene),
                fdp = scores.get(PartyCode::Fdp),
                linke = scores.get(PartyCode::Linke),
                afd = scores.get(PartyCode::Afd),
                "statement scored"
            ),
            Err(e) => warn!(kind = %e.kind(), error = %e, "evaluation failed"),
        }
        result
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("provider", &self.client.provider_name())
            .field("model", &self.client.model())
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}
