use serde::de::DeserializeOwned;

use crate::error::{EcgError, Result, Step};

/// Decode a response body into `T`, keeping the raw text on failure so it can
/// be surfaced to the caller.
pub fn decode_json<T: DeserializeOwned>(step: Step, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| EcgError::Decode {
        step,
        body: body.to_string(),
        source,
    })
}
