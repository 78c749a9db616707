// Login and logout flows

use serde_json::json;

use super::types::TokenResponse;
use crate::error::{GatewayError, Result};
use crate::http_client::{ApiGateway, ApiRequest};

/// Exchange a username/password for a token and store it
///
/// The call goes out without a bearer token. On success the token is
/// installed in the gateway's credential store and persisted.
pub async fn login(
    gateway: &ApiGateway,
    endpoint: &str,
    username: &str,
    password: &str,
) -> Result<TokenResponse> {
    tracing::info!(username = %username, "Logging in");

    let request = ApiRequest::post(endpoint)
        .json(json!({ "username": username, "password": password }))
        .anonymous();

    let response: TokenResponse = gateway.fetch(request).await?;

    gateway
        .credentials()
        .set(&response.access_token)
        .await
        .map_err(GatewayError::Credential)?;

    tracing::info!(username = %username, "Login successful");
    Ok(response)
}

/// Forget the stored token
pub async fn logout(gateway: &ApiGateway) -> Result<()> {
    gateway
        .credentials()
        .clear()
        .await
        .map_err(GatewayError::Credential)
}
