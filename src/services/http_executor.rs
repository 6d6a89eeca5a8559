use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{multipart, Client, Method, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{EcgError, Result, Step};
use crate::models::AccessToken;

/// Request body variants the billing API accepts
#[derive(Debug)]
pub enum RequestBody {
    Empty,
    /// Sent with `Content-Type: application/json`, bytes untouched
    Json(String),
    Multipart(multipart::Form),
}

/// One outbound call: URL, method, extra headers and body
#[derive(Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Attach bearer auth and the JSON content type used by every
    /// authenticated endpoint
    pub fn authenticated(mut self, step: Step, token: &AccessToken) -> Result<Self> {
        let value = HeaderValue::from_str(&token.bearer_header()).map_err(|e| {
            EcgError::RequestConstruction {
                step,
                message: format!("access token is not a valid header value: {}", e),
            }
        })?;
        self.headers.insert(AUTHORIZATION, value);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    pub fn json_body(mut self, body: String) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart_body(mut self, form: multipart::Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// Status and body text of a completed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Any non-2xx status is a failure, whatever the body says
    pub fn into_success(self, step: Step) -> Result<String> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            warn!("{} endpoint answered {}", step, self.status);
            Err(EcgError::Status {
                step,
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends single-attempt requests with a per-call timeout
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("ecg-billing-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EcgError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn execute(&self, step: Step, request: ApiRequest) -> Result<RawResponse> {
        debug!("{} {} ({})", request.method, request.url.path(), step);

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| EcgError::from_reqwest(step, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                EcgError::Timeout { step }
            } else {
                EcgError::BodyRead { step, source: e }
            }
        })?;

        debug!("{} answered {} ({} bytes)", step, status, body.len());
        Ok(RawResponse { status, body })
    }
}

/// Resolve `segments` beneath the API base, percent-encoding each one
pub fn endpoint_url(api_base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|_| EcgError::Configuration(format!("API base URL '{}' cannot carry a path", api_base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
