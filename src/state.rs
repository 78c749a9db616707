use anyhow::Result;
use std::sync::Arc;

use crate::auth::CredentialStore;
use crate::config::{Config, Endpoints};
use crate::http_client::ApiGateway;

/// Everything a view or flow needs to talk to the API
pub struct AppState {
    pub gateway: ApiGateway,
    pub endpoints: Endpoints,
}

impl AppState {
    pub fn new(config: &Config, credentials: Arc<CredentialStore>) -> Result<Self> {
        let gateway = ApiGateway::new(
            config.api_base_url.clone(),
            credentials,
            config.http_connect_timeout,
        )?;

        Ok(Self {
            gateway,
            endpoints: config.endpoints.clone(),
        })
    }

    /// State pointing at `base_url` with default endpoints
    pub fn with_base_url(base_url: &str, credentials: Arc<CredentialStore>) -> Result<Self> {
        Ok(Self {
            gateway: ApiGateway::new(base_url, credentials, None)?,
            endpoints: Endpoints::default(),
        })
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        self.gateway.credentials()
    }
}
