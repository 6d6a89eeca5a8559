use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EcgError>;

/// Text returned to legacy callers when no token could be obtained
pub const TOKEN_FAILURE_MESSAGE: &str = "Failed to retrieve token";

/// The call in the billing chain that produced an error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Token,
    Verify,
    Register,
    Balance,
    Payment,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Token => write!(f, "token"),
            Step::Verify => write!(f, "verify"),
            Step::Register => write!(f, "register"),
            Step::Balance => write!(f, "balance"),
            Step::Payment => write!(f, "payment"),
        }
    }
}

/// Error categories callers can branch on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Timeout,
    RequestConstruction,
    BodyRead,
    Decode,
    RemoteStatus,
    MissingToken,
    IncompleteMeterRecord,
    Validation,
    Configuration,
}

impl ErrorKind {
    /// Numeric code, grouped like the gateway's error codes
    pub fn code(&self) -> u16 {
        match self {
            // Transport (8xxx)
            ErrorKind::Transport => 8001,
            ErrorKind::Timeout => 8002,
            ErrorKind::RequestConstruction => 8003,
            ErrorKind::BodyRead => 8004,
            ErrorKind::RemoteStatus => 8005,

            // Response content (5xxx)
            ErrorKind::Decode => 5001,
            ErrorKind::MissingToken => 5002,
            ErrorKind::IncompleteMeterRecord => 5003,

            // Input (3xxx)
            ErrorKind::Validation => 3001,

            // Internal (9xxx)
            ErrorKind::Configuration => 9998,
        }
    }

    /// Whether issuing the same call again could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::Timeout | ErrorKind::BodyRead
        )
    }
}

#[derive(Debug, Error)]
pub enum EcgError {
    #[error("{step} request failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: reqwest::Error,
    },

    #[error("{step} request timed out")]
    Timeout { step: Step },

    #[error("could not build {step} request: {message}")]
    RequestConstruction { step: Step, message: String },

    #[error("could not read {step} response body: {source}")]
    BodyRead {
        step: Step,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not decode {step} response: {source}")]
    Decode {
        step: Step,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{step} endpoint answered {status}")]
    Status {
        step: Step,
        status: StatusCode,
        body: String,
    },

    #[error("token endpoint returned no access token")]
    MissingToken { body: String },

    #[error("meter verification returned no {missing}")]
    IncompleteMeterRecord { missing: &'static str, body: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EcgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EcgError::Transport { .. } => ErrorKind::Transport,
            EcgError::Timeout { .. } => ErrorKind::Timeout,
            EcgError::RequestConstruction { .. } => ErrorKind::RequestConstruction,
            EcgError::BodyRead { .. } => ErrorKind::BodyRead,
            EcgError::Decode { .. } => ErrorKind::Decode,
            EcgError::Status { .. } => ErrorKind::RemoteStatus,
            EcgError::MissingToken { .. } => ErrorKind::MissingToken,
            EcgError::IncompleteMeterRecord { .. } => ErrorKind::IncompleteMeterRecord,
            EcgError::Validation(_) => ErrorKind::Validation,
            EcgError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Step that failed, if the error came from a remote call
    pub fn step(&self) -> Option<Step> {
        match self {
            EcgError::Transport { step, .. }
            | EcgError::Timeout { step }
            | EcgError::RequestConstruction { step, .. }
            | EcgError::BodyRead { step, .. }
            | EcgError::Decode { step, .. }
            | EcgError::Status { step, .. } => Some(*step),
            EcgError::MissingToken { .. } => Some(Step::Token),
            EcgError::IncompleteMeterRecord { .. } => Some(Step::Verify),
            EcgError::Validation(_) | EcgError::Configuration(_) => None,
        }
    }

    /// Raw body sent back by the billing API, when the failure carried one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            EcgError::Decode { body, .. }
            | EcgError::Status { body, .. }
            | EcgError::MissingToken { body }
            | EcgError::IncompleteMeterRecord { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Render the error the way the plain-text interface always has: a fixed
    /// message for token failures, otherwise the failing call's raw body.
    pub fn legacy_text(&self) -> String {
        if self.step() == Some(Step::Token) {
            return TOKEN_FAILURE_MESSAGE.to_string();
        }
        match self.response_body() {
            Some(body) => body.to_string(),
            None => self.to_string(),
        }
    }

    pub(crate) fn from_reqwest(step: Step, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EcgError::Timeout { step }
        } else if err.is_builder() {
            EcgError::RequestConstruction {
                step,
                message: err.to_string(),
            }
        } else {
            EcgError::Transport { step, source: err }
        }
    }
}

impl From<validator::ValidationErrors> for EcgError {
    fn from(err: validator::ValidationErrors) -> Self {
        EcgError::Validation(err.to_string())
    }
}
