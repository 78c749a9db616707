// One-shot commands: run a single flow against the saved login and report the outcome

use anyhow::Result;

use super::{terminal, Boot, Shell};
use crate::config::Command;
use crate::models::NewReleaseStage;
use crate::views::{self, ContentRegion, Screen};

/// Run one non-interactive command, returning whether it succeeded
///
/// The saved token is loaded without showing a start screen. Reads fail
/// when they end on an error screen; writes fail when the server rejects
/// them.
pub async fn run(shell: &Shell, command: Command, region: &mut dyn ContentRegion) -> Result<bool> {
    shell.state().credentials().load().await?;

    let succeeded = match command {
        Command::Shell => {
            tracing::warn!("Interactive console requested from a one-shot run; ignoring");
            false
        }
        Command::Login { username, password } => {
            let (username, password) = terminal::prompt_credentials(username, password)?;
            shell.submit_login(region, &username, &password).await? == Boot::Welcome
        }
        Command::Logout => {
            shell.logout(&mut SilentRegion).await?;
            region.alert("Logged out.");
            true
        }
        Command::Show { view } => {
            let mut watched = Watched::new(region);
            shell.navigate(view, &mut watched).await;
            !watched.failed
        }
        Command::SetEmail { email } => {
            views::profile::submit_edit(shell.state(), region, &email).await
        }
        Command::AddStage {
            name,
            description,
            start_date,
            end_date,
            responsible_person,
        } => {
            let stage = NewReleaseStage {
                name,
                description,
                start_date,
                end_date,
                responsible_person,
            };
            views::releases::submit_new(shell.state(), region, stage).await
        }
    };

    tracing::debug!(succeeded, "One-shot command finished");
    Ok(succeeded)
}

/// Forwards to another region and notes whether the last screen was an error
struct Watched<'a> {
    inner: &'a mut dyn ContentRegion,
    failed: bool,
}

impl<'a> Watched<'a> {
    fn new(inner: &'a mut dyn ContentRegion) -> Self {
        Self {
            inner,
            failed: false,
        }
    }
}

impl ContentRegion for Watched<'_> {
    fn replace(&mut self, screen: Screen) {
        self.failed = screen.error_message().is_some();
        self.inner.replace(screen);
    }

    fn alert(&mut self, message: &str) {
        self.inner.alert(message);
    }
}

/// Swallows the login form shown after logout
struct SilentRegion;

impl ContentRegion for SilentRegion {
    fn replace(&mut self, _screen: Screen) {}
    fn alert(&mut self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, MemorySlot};
    use crate::shell::NavKey;
    use crate::state::AppState;
    use crate::views::testing::RecordingRegion;
    use mockito::Matcher;
    use serde_json::json;
    use std::sync::Arc;

    fn shell_with_token(url: &str) -> Shell {
        let store = CredentialStore::new(Box::new(MemorySlot::with_token("tok")));
        Shell::new(AppState::with_base_url(url, Arc::new(store)).unwrap())
    }

    fn add_stage() -> Command {
        Command::AddStage {
            name: "RC1".to_string(),
            description: String::new(),
            start_date: "2024-05-01".to_string(),
            end_date: "2024-05-10".to_string(),
            responsible_person: String::new(),
        }
    }

    #[tokio::test]
    async fn test_show_uses_saved_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/release_stages/")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"[{"name": "Beta", "start_date": "2024-01-01", "end_date": "2024-02-01"}]"#)
            .create_async()
            .await;

        let shell = shell_with_token(&server.url());
        let mut region = RecordingRegion::default();
        let show = Command::Show {
            view: NavKey::Releases,
        };

        assert!(run(&shell, show, &mut region).await.unwrap());
        assert_eq!(
            region.last().list_items(),
            Some(&["Beta (2024-01-01 - 2024-02-01)".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_show_error_screen_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/")
            .with_status(403)
            .with_body(r#"{"detail": "Not enough permissions"}"#)
            .create_async()
            .await;

        let shell = shell_with_token(&server.url());
        let mut region = RecordingRegion::default();
        let show = Command::Show { view: NavKey::Admin };

        assert!(!run(&shell, show, &mut region).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_email_success_and_failure() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/profile/")
            .match_body(Matcher::Json(json!({"email": "a@b.com"})))
            .with_status(200)
            .with_body(r#"{"message": "updated"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/profile/")
            .with_status(200)
            .with_body(r#"{"username": "alice", "email": "a@b.com", "role": "user"}"#)
            .create_async()
            .await;

        let shell = shell_with_token(&server.url());
        let mut region = RecordingRegion::default();
        let set_email = Command::SetEmail {
            email: "a@b.com".to_string(),
        };
        assert!(run(&shell, set_email, &mut region).await.unwrap());
        assert_eq!(region.alerts, vec!["Profile updated!".to_string()]);

        put.remove_async().await;
        server
            .mock("PUT", "/profile/")
            .with_status(422)
            .with_body(r#"{"detail": "Invalid email"}"#)
            .create_async()
            .await;
        let set_email = Command::SetEmail {
            email: "c@d.com".to_string(),
        };
        assert!(!run(&shell, set_email, &mut region).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_stage_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/release_stages/")
            .with_status(200)
            .with_body(r#"{"name": "RC1", "start_date": "2024-05-01", "end_date": "2024-05-10"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/release_stages/")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let shell = shell_with_token(&server.url());
        let mut region = RecordingRegion::default();

        assert!(run(&shell, add_stage(), &mut region).await.unwrap());
        assert_eq!(region.alerts, vec!["Release stage created.".to_string()]);
    }

    #[tokio::test]
    async fn test_add_stage_rejected_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/release_stages/")
            .with_status(403)
            .with_body(r#"{"detail": "Not enough permissions"}"#)
            .create_async()
            .await;

        let shell = shell_with_token(&server.url());
        let mut region = RecordingRegion::default();

        assert!(!run(&shell, add_stage(), &mut region).await.unwrap());
        assert_eq!(
            region.alerts,
            vec!["Failed to create release stage: Not enough permissions".to_string()]
        );
    }

    #[tokio::test]
    async fn test_add_stage_without_login_fails() {
        let mut server = mockito::Server::new_async().await;
        let any = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let store = CredentialStore::in_memory();
        let shell = Shell::new(AppState::with_base_url(&server.url(), Arc::new(store)).unwrap());
        let mut region = RecordingRegion::default();

        assert!(!run(&shell, add_stage(), &mut region).await.unwrap());
        assert_eq!(
            region.alerts,
            vec!["Failed to create release stage: Not logged in".to_string()]
        );
        any.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_with_given_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"access_token": "fresh"}"#)
            .create_async()
            .await;

        let store = CredentialStore::in_memory();
        let shell = Shell::new(AppState::with_base_url(&server.url(), Arc::new(store)).unwrap());
        let mut region = RecordingRegion::default();
        let login = Command::Login {
            username: Some("alice".to_string()),
            password: Some("secret".to_string()),
        };

        assert!(run(&shell, login, &mut region).await.unwrap());
        assert_eq!(
            shell.state().credentials().get().await,
            Some("fresh".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_rejected_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Incorrect username or password"}"#)
            .create_async()
            .await;

        let store = CredentialStore::in_memory();
        let shell = Shell::new(AppState::with_base_url(&server.url(), Arc::new(store)).unwrap());
        let mut region = RecordingRegion::default();
        let login = Command::Login {
            username: Some("alice".to_string()),
            password: Some("wrong".to_string()),
        };

        assert!(!run(&shell, login, &mut region).await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let shell = shell_with_token("http://127.0.0.1:9");
        let mut region = RecordingRegion::default();

        assert!(run(&shell, Command::Logout, &mut region).await.unwrap());
        assert_eq!(region.alerts, vec!["Logged out.".to_string()]);
        assert!(region.screens.is_empty());
        assert!(!shell.state().credentials().is_authenticated().await);
    }
}
