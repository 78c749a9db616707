use anyhow::Context;
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::CredentialStore;
use crate::error::{GatewayError, Result};

/// A single call to the release management API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
    /// Whether the call goes out with the stored bearer token
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// Attach a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send without a bearer token even if one is stored
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Gateway to the release management API
///
/// Every call is one round trip: no retries, and no timeouts beyond what
/// the transport applies. Failures of any kind come back as [`GatewayError`].
pub struct ApiGateway {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Base address every endpoint is appended to
    base_url: String,

    /// Source of the bearer token
    credentials: Arc<CredentialStore>,
}

impl ApiGateway {
    /// Create a new gateway
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<CredentialStore>,
        connect_timeout: Option<u64>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = connect_timeout {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// The store this gateway reads its token from
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and return the decoded JSON body
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, request.endpoint);

        let token = if request.authenticated {
            match self.credentials.get().await {
                Some(token) => Some(token),
                None => {
                    tracing::warn!(url = %url, "Refusing authenticated request without a token");
                    return Err(GatewayError::NotAuthenticated);
                }
            }
        } else {
            None
        };

        tracing::debug!(
            method = %request.method,
            url = %url,
            authenticated = token.is_some(),
            "Sending HTTP request"
        );

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(ref token) = token {
            builder = builder.bearer_auth(token);
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.to_string());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error_kind = error_kind(&e),
                    error = %e,
                    url = %url,
                    "HTTP request error"
                );
                return Err(GatewayError::Transport(e));
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::warn!(error_kind = error_kind(&e), error = %e, url = %url, "Failed to read response body");
            GatewayError::Transport(e)
        })?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                url = %url,
                response_body = %text,
                "Received error response"
            );
            return Err(GatewayError::from_error_body(status.as_u16(), &text));
        }

        tracing::debug!(status = %status, "Request successful");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Issue a request and decode the body into `T`
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Categorize a transport error for logging
fn error_kind(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connection_failed"
    } else if e.is_request() {
        "request_error"
    } else if e.is_body() {
        "body_error"
    } else if e.is_decode() {
        "decode_error"
    } else {
        "unknown"
    }
}
