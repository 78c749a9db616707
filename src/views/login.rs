use super::{FieldKind, Form, FormField, FormId, Screen};

/// Username/password form shown when no login is saved
pub fn form() -> Screen {
    Screen::new("Login").form(Form {
        id: FormId::Login,
        fields: vec![
            FormField::new("username", "Username", FieldKind::Text),
            FormField::new("password", "Password", FieldKind::Password),
        ],
        submit_label: "Login".to_string(),
    })
}
