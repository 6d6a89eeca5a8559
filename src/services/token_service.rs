use reqwest::{multipart::Form, Method, Url};
use tracing::{info, instrument, warn};

use super::http_executor::{ApiRequest, HttpExecutor};
use crate::config::Credentials;
use crate::error::{EcgError, Result, Step};
use crate::models::{AccessToken, TokenResponse};
use crate::utils::decode_json;

/// Exchanges the service-account credentials for a bearer token
#[derive(Clone, Debug)]
pub struct TokenService {
    executor: HttpExecutor,
    token_url: Url,
    credentials: Credentials,
}

impl TokenService {
    pub fn new(executor: HttpExecutor, token_url: Url, credentials: Credentials) -> Self {
        Self {
            executor,
            token_url,
            credentials,
        }
    }

    fn credential_form(&self) -> Form {
        Form::new()
            .text("username", self.credentials.username.clone())
            .text("password", self.credentials.password.clone())
            .text("grant_type", self.credentials.grant_type.clone())
            .text("client_id", self.credentials.client_id.clone())
            .text("client_secret", self.credentials.client_secret.clone())
    }

    /// Request a fresh token. Nothing is cached between calls.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<AccessToken> {
        let request = ApiRequest::new(Method::POST, self.token_url.clone())
            .multipart_body(self.credential_form());

        let body = self
            .executor
            .execute(Step::Token, request)
            .await?
            .into_success(Step::Token)?;

        let response: TokenResponse = decode_json(Step::Token, &body)?;
        match AccessToken::from_response(response) {
            Some(token) => {
                info!(
                    "Access token acquired (type: {}, expires_in: {:?})",
                    token.token_type, token.expires_in
                );
                Ok(token)
            }
            None => {
                warn!("Token endpoint answered without an access token");
                Err(EcgError::MissingToken { body })
            }
        }
    }
}
