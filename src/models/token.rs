use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by the OAuth token endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Bearer credential for a single top-level operation
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub acquired_at: DateTime<Utc>,
}

impl AccessToken {
    /// Returns `None` when the endpoint handed back an empty token
    pub fn from_response(response: TokenResponse) -> Option<Self> {
        if response.access_token.trim().is_empty() {
            return None;
        }
        Some(Self {
            value: response.access_token,
            token_type: response.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_in: response.expires_in,
            acquired_at: Utc::now(),
        })
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.value)
    }

    /// `None` when no lifetime was given or it is too large to represent
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.expires_in?).ok()?;
        self.acquired_at
            .checked_add_signed(TimeDelta::try_seconds(secs)?)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}
