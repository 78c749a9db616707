use serde_json::json;

use super::{Action, ContentRegion, FieldKind, Form, FormField, FormId, FormValues, Screen};
use crate::http_client::ApiRequest;
use crate::models::{NewReleaseStage, ReleaseStage};
use crate::state::AppState;

pub fn screen(stages: &[ReleaseStage]) -> Screen {
    Screen::new("Releases")
        .list(stages.iter().map(ReleaseStage::summary).collect())
        .action(Action::NewReleaseStage, "New Release Stage")
}

pub fn new_stage_form() -> Screen {
    Screen::new("New Release Stage").form(Form {
        id: FormId::NewReleaseStage,
        fields: vec![
            FormField::new("name", "Name", FieldKind::Text),
            FormField::new("description", "Description", FieldKind::Text).optional(),
            FormField::new("start_date", "Start date", FieldKind::Date),
            FormField::new("end_date", "End date", FieldKind::Date),
            FormField::new("responsible_person", "Responsible person", FieldKind::Text).optional(),
        ],
        submit_label: "Create".to_string(),
    })
}

pub fn stage_from_form(values: &FormValues) -> NewReleaseStage {
    NewReleaseStage {
        name: values.get("name").to_string(),
        description: values.get("description").to_string(),
        start_date: values.get("start_date").to_string(),
        end_date: values.get("end_date").to_string(),
        responsible_person: values.get("responsible_person").to_string(),
    }
}

/// Fetch and list all release stages
pub async fn load(state: &AppState, region: &mut dyn ContentRegion) {
    region.replace(Screen::loading("Loading releases..."));

    let request = ApiRequest::get(state.endpoints.release_stages.as_str());
    match state.gateway.fetch::<Vec<ReleaseStage>>(request).await {
        Ok(stages) => {
            tracing::debug!(count = stages.len(), "Loaded release stages");
            region.replace(screen(&stages));
        }
        Err(e) => region.replace(Screen::error("Error loading releases", &e)),
    }
}

/// Create a release stage, then show the refreshed list
///
/// Returns whether the stage was created.
pub async fn submit_new(
    state: &AppState,
    region: &mut dyn ContentRegion,
    stage: NewReleaseStage,
) -> bool {
    let body = json!({
        "name": stage.name,
        "description": stage.description,
        "start_date": stage.start_date,
        "end_date": stage.end_date,
        "responsible_person": stage.responsible_person,
    });
    let request = ApiRequest::post(state.endpoints.release_stages.as_str()).json(body);

    match state.gateway.send(request).await {
        Ok(_) => {
            region.alert("Release stage created.");
            load(state, region).await;
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, "Release stage creation failed");
            region.alert(&format!("Failed to create release stage: {}", e));
            false
        }
    }
}
