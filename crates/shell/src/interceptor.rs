//! API client with the auth-error interceptor.
//!
//! Every backend request flows through [`ApiClient`]: the stored access
//! token is attached on the way out, and a 401 on the way back clears the
//! session and bounces the user to the login page with a localized message.
//! There is no token refresh and no retry; re-authentication is the only
//! recovery from a 401.

use std::sync::Arc;

use async_trait::async_trait;
use pagerodeo_auth::TokenPair;
use pagerodeo_core::PreferenceStore;
use pagerodeo_i18n::LanguageRegistry;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::navigate::Navigator;

/// Paths on which a 401 clears credentials but does not redirect; the user
/// is already on (or inside) the login flow.
const AUTH_FLOW_PATHS: &[&str] = &["/login", "/register", "/verify-email", "/workspace/login"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One outbound request, before the bearer token is attached.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Get,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: ApiMethod::Post,
            url: url.into(),
            bearer: None,
            body: Some(body),
        }
    }
}

/// A completed response. Any status lands here; classification happens in
/// the client.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.body.clone())
            .map_err(|error| ApiError::Decode(error.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the credentials; the session has been cleared.
    #[error("unauthorized")]
    Unauthorized,

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("response decode failure: {0}")]
    Decode(String),
}

/// Wire seam; [`ReqwestTransport`] in production, scripted fakes in tests.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = match request.method {
            ApiMethod::Get => self.client.get(&request.url),
            ApiMethod::Post => self.client.post(&request.url),
            ApiMethod::Put => self.client.put(&request.url),
            ApiMethod::Delete => self.client.delete(&request.url),
        };
        if let Some(bearer) = &request.bearer {
            builder = builder.bearer_auth(bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .json()
            .await
            .unwrap_or(serde_json::Value::Null);

        Ok(ApiResponse { status, body })
    }
}

/// Authenticated API access with the 401 interceptor applied to every call.
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    store: Arc<dyn PreferenceStore>,
    navigator: Arc<dyn Navigator>,
    i18n: Arc<LanguageRegistry>,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        store: Arc<dyn PreferenceStore>,
        navigator: Arc<dyn Navigator>,
        i18n: Arc<LanguageRegistry>,
    ) -> Self {
        Self {
            transport,
            store,
            navigator,
            i18n,
        }
    }

    pub async fn get(&self, url: impl Into<String>) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::get(url)).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: impl Into<String>,
    ) -> Result<T, ApiError> {
        self.get(url).await?.json()
    }

    pub async fn post(
        &self,
        url: impl Into<String>,
        body: serde_json::Value,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::post(url, body)).await
    }

    /// Attach the stored bearer token, send, and classify the outcome.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if request.bearer.is_none() {
            request.bearer = TokenPair::access_token(self.store.as_ref());
        }

        let response = self.transport.send(request).await?;
        match response.status {
            200..=299 => Ok(response),
            401 => {
                self.handle_unauthorized();
                Err(ApiError::Unauthorized)
            }
            status => Err(ApiError::Status(status)),
        }
    }

    /// Invalidate the session and, away from the login flow, bounce to the
    /// login page with a localized expired-session message.
    fn handle_unauthorized(&self) {
        TokenPair::clear(self.store.as_ref());

        let current = self.navigator.current_path();
        // Same normalization as the chrome decision, so `/login/` and
        // `/login?next=…` count as the login page too.
        let current_page = crate::chrome::normalize(&current);
        if AUTH_FLOW_PATHS.contains(&current_page.as_str()) {
            tracing::debug!(path = %current, "401 on an auth-flow page, staying put");
            return;
        }

        let message = self.i18n.translate("auth.session_expired");
        let destination = format!("/login?message={}", encode_query_component(&message));
        tracing::info!(from = %current, "session expired, redirecting to login");
        self.navigator.navigate(&destination);
    }
}

/// Percent-encode a query-string value. Unreserved characters pass through,
/// everything else is `%XX`-encoded per byte.
fn encode_query_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            other => {
                encoded.push('%');
                encoded.push(char::from_digit(u32::from(other >> 4), 16).unwrap_or('0').to_ascii_uppercase());
                encoded.push(char::from_digit(u32::from(other & 0x0f), 16).unwrap_or('0').to_ascii_uppercase());
            }
        }
    }
    encoded
}
