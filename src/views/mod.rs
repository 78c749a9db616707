// Screens of the console
// Each view module fills the content region with a `Screen`; `render` turns screens into text

pub mod admin;
pub mod help;
pub mod login;
pub mod profile;
pub mod releases;

use std::collections::HashMap;

use crate::error::GatewayError;
use crate::state::AppState;

/// Something a screen offers beyond navigation
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open the profile form pre-filled with the current email
    EditProfile { current_email: String },
    /// Open the empty release stage form
    NewReleaseStage,
}

/// Which flow a submitted form belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    Login,
    EditProfile,
    NewReleaseStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Pre-filled value
    pub value: String,
    pub required: bool,
}

impl FormField {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value: String::new(),
            required: true,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub id: FormId,
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

/// Values collected from a form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Value of a field, empty when it was never filled
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    Field { label: String, value: String },
    List(Vec<String>),
    Action { action: Action, label: String },
    Form(Form),
    Error(String),
}

/// Everything shown in the content region at one time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl Screen {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            blocks: Vec::new(),
        }
    }

    /// Placeholder shown while a request is in flight
    pub fn loading(message: &str) -> Self {
        Self::default().paragraph(message)
    }

    /// `"<context>: <error message>"` with no title
    pub fn error(context: &str, err: &GatewayError) -> Self {
        Self {
            title: None,
            blocks: vec![Block::Error(format!("{}: {}", context, err))],
        }
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.blocks.push(Block::Field {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn list(mut self, items: Vec<String>) -> Self {
        self.blocks.push(Block::List(items));
        self
    }

    pub fn action(mut self, action: Action, label: &str) -> Self {
        self.blocks.push(Block::Action {
            action,
            label: label.to_string(),
        });
        self
    }

    pub fn form(mut self, form: Form) -> Self {
        self.blocks.push(Block::Form(form));
        self
    }

    /// Actions offered by this screen, in order
    pub fn actions(&self) -> Vec<(&Action, &str)> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Action { action, label } => Some((action, label.as_str())),
                _ => None,
            })
            .collect()
    }

    /// The form on this screen, if any
    pub fn form_block(&self) -> Option<&Form> {
        self.blocks.iter().find_map(|b| match b {
            Block::Form(form) => Some(form),
            _ => None,
        })
    }

    /// Items of the first list on this screen
    pub fn list_items(&self) -> Option<&[String]> {
        self.blocks.iter().find_map(|b| match b {
            Block::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// First error message on this screen
    pub fn error_message(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Error(msg) => Some(msg.as_str()),
            _ => None,
        })
    }
}

/// The area a view draws into
///
/// `replace` swaps the whole content; `alert` is a blocking notice the
/// user has to acknowledge.
pub trait ContentRegion {
    fn replace(&mut self, screen: Screen);
    fn alert(&mut self, message: &str);
}

/// Neutral screen shown at startup when a saved login exists
pub fn welcome() -> Screen {
    Screen::default().paragraph("Welcome back! Choose an option from the menu.")
}

/// Run a screen action
pub fn perform(action: &Action, region: &mut dyn ContentRegion) {
    match action {
        Action::EditProfile { current_email } => region.replace(profile::edit_form(current_email)),
        Action::NewReleaseStage => region.replace(releases::new_stage_form()),
    }
}

/// Submit a profile or release stage form, returning whether it was accepted
///
/// Login forms are owned by the shell, which re-boots after them.
pub async fn submit(
    state: &AppState,
    region: &mut dyn ContentRegion,
    form: FormId,
    values: &FormValues,
) -> bool {
    match form {
        FormId::EditProfile => profile::submit_edit(state, region, values.get("email")).await,
        FormId::NewReleaseStage => {
            releases::submit_new(state, region, releases::stage_from_form(values)).await
        }
        FormId::Login => {
            tracing::warn!("Login form submitted to a view; ignoring");
            false
        }
    }
}
