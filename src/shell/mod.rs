// Console shell
// Decides between login and welcome at startup and routes navigation to views

pub mod oneshot;
mod router;
pub mod terminal;

pub use router::{NavKey, Router, ViewFuture, ViewHandler};

use anyhow::Result;

use crate::auth;
use crate::state::AppState;
use crate::views::{self, ContentRegion, FormId, FormValues};

/// Where the shell ended up after (re)booting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boot {
    /// A saved token was found and installed
    Welcome,
    /// No token; the login form is showing
    LoginRequired,
}

pub struct Shell {
    state: AppState,
    router: Router,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self::with_router(state, Router::new())
    }

    pub fn with_router(state: AppState, router: Router) -> Self {
        Self { state, router }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Read the saved token and show the matching start screen
    ///
    /// Also serves as the full reload after login and logout.
    pub async fn boot(&self, region: &mut dyn ContentRegion) -> Result<Boot> {
        match self.state.credentials().load().await? {
            Some(_) => {
                tracing::info!("Found saved login");
                region.replace(views::welcome());
                Ok(Boot::Welcome)
            }
            None => {
                tracing::info!("No saved login; showing login form");
                region.replace(views::login::form());
                Ok(Boot::LoginRequired)
            }
        }
    }

    /// Run the login flow; on success reload, on failure keep the form
    pub async fn submit_login(
        &self,
        region: &mut dyn ContentRegion,
        username: &str,
        password: &str,
    ) -> Result<Boot> {
        match auth::login(&self.state.gateway, &self.state.endpoints.login, username, password)
            .await
        {
            Ok(_) => {
                region.alert("Login successful!");
                self.boot(region).await
            }
            Err(e) => {
                region.alert(&format!("Login failed: {}", e));
                Ok(Boot::LoginRequired)
            }
        }
    }

    /// Forget the saved token and go back to the login form
    pub async fn logout(&self, region: &mut dyn ContentRegion) -> Result<Boot> {
        auth::logout(&self.state.gateway).await?;
        self.boot(region).await
    }

    /// Show one of the navigation views
    pub async fn navigate(&self, key: NavKey, region: &mut dyn ContentRegion) {
        self.router.dispatch(key, &self.state, region).await;
    }

    /// Route a submitted form to its flow
    ///
    /// Returns the new boot state when the form was the login form.
    pub async fn submit(
        &self,
        region: &mut dyn ContentRegion,
        form: FormId,
        values: &FormValues,
    ) -> Result<Option<Boot>> {
        match form {
            FormId::Login => {
                let boot = self
                    .submit_login(region, values.get("username"), values.get("password"))
                    .await?;
                Ok(Some(boot))
            }
            _ => {
                views::submit(&self.state, region, form, values).await;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, MemorySlot};
    use crate::views::testing::RecordingRegion;
    use mockito::Matcher;
    use serde_json::json;
    use std::sync::Arc;

    fn shell_with(url: &str, store: CredentialStore) -> Shell {
        Shell::new(AppState::with_base_url(url, Arc::new(store)).unwrap())
    }

    #[tokio::test]
    async fn test_boot_without_token_shows_login() {
        let mut server = mockito::Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let shell = shell_with(&server.url(), CredentialStore::in_memory());
        let mut region = RecordingRegion::default();
        let boot = shell.boot(&mut region).await.unwrap();

        assert_eq!(boot, Boot::LoginRequired);
        assert_eq!(region.last().form_block().unwrap().id, FormId::Login);
        any.assert_async().await;
    }

    #[tokio::test]
    async fn test_boot_with_saved_token_welcomes() {
        let store = CredentialStore::new(Box::new(MemorySlot::with_token("saved")));
        let shell = shell_with("http://127.0.0.1:9", store);
        let mut region = RecordingRegion::default();

        assert_eq!(shell.boot(&mut region).await.unwrap(), Boot::Welcome);
        assert_eq!(region.last(), &views::welcome());
        assert_eq!(
            shell.state().credentials().get().await,
            Some("saved".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_login_reloads_into_welcome() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(json!({"username": "alice", "password": "pw"})))
            .with_status(200)
            .with_body(r#"{"access_token": "fresh", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let shell = shell_with(&server.url(), CredentialStore::in_memory());
        let mut region = RecordingRegion::default();
        shell.boot(&mut region).await.unwrap();

        let values = FormValues::new()
            .with("username", "alice")
            .with("password", "pw");
        let boot = shell.submit(&mut region, FormId::Login, &values).await.unwrap();

        assert_eq!(boot, Some(Boot::Welcome));
        assert_eq!(region.alerts, vec!["Login successful!".to_string()]);
        assert_eq!(region.last(), &views::welcome());
    }

    #[tokio::test]
    async fn test_submit_login_failure_alerts_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Incorrect username or password"}"#)
            .create_async()
            .await;

        let shell = shell_with(&server.url(), CredentialStore::in_memory());
        let mut region = RecordingRegion::default();
        shell.boot(&mut region).await.unwrap();

        let boot = shell.submit_login(&mut region, "alice", "bad").await.unwrap();

        assert_eq!(boot, Boot::LoginRequired);
        assert_eq!(
            region.alerts,
            vec!["Login failed: Incorrect username or password".to_string()]
        );
        // The login form is still what the user sees
        assert_eq!(region.screens.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let store = CredentialStore::new(Box::new(MemorySlot::with_token("saved")));
        let shell = shell_with("http://127.0.0.1:9", store);
        let mut region = RecordingRegion::default();
        shell.boot(&mut region).await.unwrap();

        assert_eq!(shell.logout(&mut region).await.unwrap(), Boot::LoginRequired);
        assert!(!shell.state().credentials().is_authenticated().await);
        assert_eq!(region.last().form_block().unwrap().id, FormId::Login);
    }
}
