use reqwest::Url;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{EcgError, Result};

pub const DEFAULT_GRANT_TYPE: &str = "password";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved billing API endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: Url,
    /// Always ends with `/` so relative paths resolve beneath it
    pub api_base: Url,
}

impl Endpoints {
    pub fn new(token_url: &str, api_base: &str) -> Result<Self> {
        let token_url = Url::parse(token_url).map_err(|e| {
            EcgError::Configuration(format!("Invalid token URL '{}': {}", token_url, e))
        })?;

        let mut api_base = Url::parse(api_base).map_err(|e| {
            EcgError::Configuration(format!("Invalid API base URL '{}': {}", api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(EcgError::Configuration(format!(
                "API base URL '{}' cannot carry a path",
                api_base
            )));
        }
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        Ok(Self {
            token_url,
            api_base,
        })
    }
}

/// Static service-account credentials exchanged for a bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    pub credentials: Credentials,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoints: Endpoints, credentials: Credentials) -> Self {
        Self {
            endpoints,
            credentials,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    EcgError::Configuration(format!("{} environment variable is required", key))
                })
        };

        let endpoints = Endpoints::new(&required("ECG_TOKEN_URL")?, &required("ECG_API_URL")?)?;

        let credentials = Credentials {
            username: required("ECG_USERNAME")?,
            password: required("ECG_PASSWORD")?,
            grant_type: lookup("ECG_GRANT_TYPE")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GRANT_TYPE.to_string()),
            client_id: required("ECG_CLIENT_ID")?,
            client_secret: required("ECG_CLIENT_SECRET")?,
        };

        let mut timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
        if let Some(val) = lookup("ECG_REQUEST_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    timeout_secs = secs;
                    info!("Using custom request timeout: {}s", secs);
                }
                Ok(_) => warn!(
                    "Invalid request timeout: {}, must be > 0, using default",
                    val
                ),
                Err(_) => warn!("Failed to parse request timeout: {}, using default", val),
            }
        }

        Ok(Self::new(endpoints, credentials).with_request_timeout(Duration::from_secs(timeout_secs)))
    }
}
