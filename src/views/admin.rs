use super::{ContentRegion, Screen};
use crate::http_client::ApiRequest;
use crate::models::User;
use crate::state::AppState;

pub fn screen(users: &[User]) -> Screen {
    Screen::new("Admin Panel").list(
        users
            .iter()
            .map(|u| format!("{} ({})", u.username, u.role.name))
            .collect(),
    )
}

/// List every user with their role
///
/// No role check happens here; the API rejects callers without privilege.
pub async fn load(state: &AppState, region: &mut dyn ContentRegion) {
    region.replace(Screen::loading("Loading admin panel..."));

    let request = ApiRequest::get(state.endpoints.users.as_str());
    match state.gateway.fetch::<Vec<User>>(request).await {
        Ok(users) => region.replace(screen(&users)),
        Err(e) => region.replace(Screen::error("Error loading admin panel", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::views::testing::RecordingRegion;
    use std::sync::Arc;

    async fn state_for(url: &str) -> AppState {
        let store = Arc::new(CredentialStore::in_memory());
        store.set("tok").await.unwrap();
        AppState::with_base_url(url, store).unwrap()
    }

    #[tokio::test]
    async fn test_lists_users_with_roles() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/")
            .with_status(200)
            .with_body(
                r#"[{"username": "root", "role": {"name": "admin"}},
                    {"username": "dev", "role": {"name": "user"}}]"#,
            )
            .create_async()
            .await;

        let state = state_for(&server.url()).await;
        let mut region = RecordingRegion::default();
        load(&state, &mut region).await;

        assert_eq!(region.screens[0], Screen::loading("Loading admin panel..."));
        assert_eq!(region.last().title.as_deref(), Some("Admin Panel"));
        assert_eq!(
            region.last().list_items(),
            Some(&["root (admin)".to_string(), "dev (user)".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_forbidden_shows_server_detail() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/")
            .with_status(403)
            .with_body(r#"{"detail": "Not enough permissions"}"#)
            .expect(1)
            .create_async()
            .await;

        let state = state_for(&server.url()).await;
        let mut region = RecordingRegion::default();
        load(&state, &mut region).await;

        mock.assert_async().await;
        assert_eq!(
            region.last().error_message(),
            Some("Error loading admin panel: Not enough permissions")
        );
    }
}
