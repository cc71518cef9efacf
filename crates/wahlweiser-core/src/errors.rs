//! Error types for statement evaluation.

use std::fmt;
use std::time::Duration;

/// Failure talking to the language-model provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Connection, DNS or TLS failure, or an unreadable response body.
    #[error("network error: {message}")]
    Network { message: String },

    /// No reply within the configured bound.
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// Credential missing, invalid or lacking permission.
    #[error("unauthorized (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-success status.
    #[error("provider error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Outbound traffic disabled by policy.
    #[error("outbound network blocked by policy (target={target}): {reason}")]
    Blocked { target: String, reason: String },

    /// The call completed but the response envelope had no reply content.
    #[error("malformed provider response: {message}")]
    MalformedEnvelope { message: String, body: String },

    /// Scripted client ran out of replies.
    #[error("no scripted reply left")]
    Exhausted,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// The two failure kinds surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// The external call could not complete.
    Transport,
    /// The call completed but the reply is not a valid score map.
    Parse,
}

impl EvalErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EvalErrorKind::Transport => "TransportFailure",
            EvalErrorKind::Parse => "ParseFailure",
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single evaluation produced no score map.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("transport failure: {source}")]
    Transport {
        #[from]
        source: ProviderError,
    },

    #[error("parse failure: {message}")]
    Parse {
        message: String,
        /// Whatever the provider returned, for diagnostics.
        raw: Option<String>,
    },
}

impl EvalError {
    pub fn parse(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            raw: Some(raw.into()),
        }
    }

    pub fn kind(&self) -> EvalErrorKind {
        match self {
            Self::Transport { .. } => EvalErrorKind::Transport,
            Self::Parse { .. } => EvalErrorKind::Parse,
        }
    }

    /// Raw provider payload, if one was received before the failure.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Transport {
                source: ProviderError::MalformedEnvelope { body, .. },
            } => Some(body.as_str()),
            Self::Transport { .. } => None,
            Self::Parse { raw, .. } => raw.as_deref(),
        }
    }

    /// Whether re-submitting the same statement might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                source: ProviderError::Network { .. }
                    | ProviderError::Timeout { .. }
                    | ProviderError::RateLimited { .. }
                    | ProviderError::Server { .. }
            }
        )
    }
}

/// Invalid startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing API key: set {env} or pass --api-key")]
    MissingApiKey { env: &'static str },

    #[error("unknown provider '{0}' (expected 'openai' or 'fake')")]
    UnknownProvider(String),

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}
