use super::{ChatRequest, LlmClient, LlmResponse};
use crate::errors::ProviderError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned replies in order. Each call consumes one entry.
#[derive(Debug)]
pub struct ScriptedClient {
    model: String,
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn with_error(self, err: ProviderError) -> Self {
        self.push(Err(err));
        self
    }

    pub fn with_replies<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for reply in replies {
            self.push(Ok(reply.into()));
        }
        self
    }

    fn push(&self, entry: Result<String, ProviderError>) {
        if let Ok(mut q) = self.replies.lock() {
            q.push_back(entry);
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, ProviderError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }

        let next = self
            .replies
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .ok_or(ProviderError::Exhausted)?;

        Ok(LlmResponse {
            text: next?,
            provider: "fake".to_string(),
            model: self.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
