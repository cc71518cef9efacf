//! Outbound network policy.
//!
//! `WAHLWEISER_NETWORK_POLICY=deny` makes every provider call fail before a
//! socket is opened.

use crate::errors::ProviderError;

pub const NETWORK_POLICY_ENV: &str = "WAHLWEISER_NETWORK_POLICY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkPolicy {
    Allow,
    Deny(String),
}

impl NetworkPolicy {
    pub fn from_env() -> Self {
        match std::env::var(NETWORK_POLICY_ENV) {
            Ok(raw) if raw.trim().eq_ignore_ascii_case("deny") => {
                NetworkPolicy::Deny(format!("{}=deny", NETWORK_POLICY_ENV))
            }
            _ => NetworkPolicy::Allow,
        }
    }

    pub fn check(&self, target: &str) -> Result<(), ProviderError> {
        match self {
            NetworkPolicy::Allow => Ok(()),
            NetworkPolicy::Deny(reason) => Err(ProviderError::Blocked {
                target: target.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Check `target` against the policy currently set in the environment.
pub fn check_outbound(target: &str) -> Result<(), ProviderError> {
    NetworkPolicy::from_env().check(target)
}
