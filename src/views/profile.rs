use serde_json::json;

use super::{Action, ContentRegion, FieldKind, Form, FormField, FormId, Screen};
use crate::http_client::ApiRequest;
use crate::models::Profile;
use crate::state::AppState;

pub fn screen(profile: &Profile) -> Screen {
    Screen::new("Profile")
        .field("Username", profile.username.as_str())
        .field("Email", profile.email.as_str())
        .field("Role", profile.role.as_str())
        .action(
            Action::EditProfile {
                current_email: profile.email.clone(),
            },
            "Edit Profile",
        )
}

pub fn edit_form(current_email: &str) -> Screen {
    Screen::new("Edit Profile").form(Form {
        id: FormId::EditProfile,
        fields: vec![FormField::new("email", "Email", FieldKind::Email).with_value(current_email)],
        submit_label: "Save".to_string(),
    })
}

/// Fetch and show the signed-in user's profile
pub async fn load(state: &AppState, region: &mut dyn ContentRegion) {
    region.replace(Screen::loading("Loading profile..."));

    let request = ApiRequest::get(state.endpoints.profile.as_str());
    match state.gateway.fetch::<Profile>(request).await {
        Ok(profile) => region.replace(screen(&profile)),
        Err(e) => {
            tracing::debug!(error = %e, "Profile load failed");
            region.replace(Screen::error("Error loading profile", &e));
        }
    }
}

/// Save a new email, then show the refreshed profile
///
/// Returns whether the server accepted the change.
pub async fn submit_edit(
    state: &AppState,
    region: &mut dyn ContentRegion,
    email: &str,
) -> bool {
    let request = ApiRequest::put(state.endpoints.profile.as_str()).json(json!({ "email": email }));

    match state.gateway.send(request).await {
        Ok(_) => {
            region.alert("Profile updated!");
            load(state, region).await;
            true
        }
        Err(e) => {
            region.replace(Screen::error("Error updating profile", &e));
            false
        }
    }
}
