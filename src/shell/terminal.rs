// Interactive terminal front end

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::{cursor, execute, terminal};
use dialoguer::{Input, Password, Select};
use std::io::{self, Write};

use super::{NavKey, Shell};
use crate::render::render;
use crate::views::{self, Action, ContentRegion, FieldKind, Form, FormId, FormValues, Screen};

/// Content region drawn on the terminal
pub struct TerminalRegion {
    current: Screen,
    /// Clear the terminal before each screen (interactive mode)
    clear: bool,
}

impl TerminalRegion {
    /// Full-screen region for the interactive console
    pub fn interactive() -> Self {
        Self {
            current: Screen::default(),
            clear: true,
        }
    }

    /// Region that just prints, for one-shot commands
    pub fn plain() -> Self {
        Self {
            current: Screen::default(),
            clear: false,
        }
    }

    pub fn current(&self) -> &Screen {
        &self.current
    }
}

impl ContentRegion for TerminalRegion {
    fn replace(&mut self, screen: Screen) {
        let mut stdout = io::stdout();
        if self.clear {
            if let Err(e) = execute!(
                stdout,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            ) {
                tracing::debug!(error = %e, "Failed to clear terminal");
            }
        }
        if let Err(e) = write!(stdout, "{}", render(&screen)).and_then(|_| stdout.flush()) {
            tracing::debug!(error = %e, "Failed to draw screen");
        }
        self.current = screen;
    }

    fn alert(&mut self, message: &str) {
        if !self.clear {
            println!("{}", message);
            return;
        }
        println!();
        let acknowledged = Input::<String>::new()
            .with_prompt(format!("{} (press Enter)", message))
            .allow_empty(true)
            .interact_text();
        if let Err(e) = acknowledged {
            tracing::debug!(error = %e, "Alert prompt failed");
        }
    }
}

/// One line of the console menu
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Fill(FormId),
    Act(Action),
    Nav(NavKey),
    Logout,
    Quit,
}

/// Menu for the screen currently shown
///
/// Form and screen actions come first, then the navigation bar.
pub fn menu_entries(screen: &Screen) -> Vec<(MenuEntry, String)> {
    let mut entries = Vec::new();

    if let Some(form) = screen.form_block() {
        entries.push((MenuEntry::Fill(form.id), form.submit_label.clone()));
    }
    for (action, label) in screen.actions() {
        entries.push((MenuEntry::Act(action.clone()), label.to_string()));
    }
    for key in NavKey::ALL {
        entries.push((MenuEntry::Nav(key), key.label().to_string()));
    }
    entries.push((MenuEntry::Logout, "Logout".to_string()));
    entries.push((MenuEntry::Quit, "Quit".to_string()));

    entries
}

/// Run the console until the user quits
pub async fn run(shell: &Shell) -> Result<()> {
    let mut region = TerminalRegion::interactive();
    shell.boot(&mut region).await?;

    loop {
        let entries = menu_entries(region.current());
        let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();

        println!();
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&labels)
            .default(0)
            .interact()
            .context("Failed to read menu selection")?;

        match &entries[choice].0 {
            MenuEntry::Fill(_) => {
                let Some(form) = region.current().form_block().cloned() else {
                    continue;
                };
                let values = collect_form(&form)?;
                shell.submit(&mut region, form.id, &values).await?;
            }
            MenuEntry::Act(action) => views::perform(action, &mut region),
            MenuEntry::Nav(key) => shell.navigate(*key, &mut region).await,
            MenuEntry::Logout => {
                shell.logout(&mut region).await?;
            }
            MenuEntry::Quit => break,
        }
    }

    tracing::info!("Console closed");
    Ok(())
}

/// Prompt for every field of a form
pub fn collect_form(form: &Form) -> Result<FormValues> {
    let mut values = FormValues::new();

    for field in &form.fields {
        let value = match field.kind {
            FieldKind::Password => Password::new()
                .with_prompt(&field.label)
                .allow_empty_password(!field.required)
                .interact()
                .with_context(|| format!("Failed to read {}", field.name))?,
            kind => {
                let required = field.required;
                Input::<String>::new()
                    .with_prompt(&field.label)
                    .with_initial_text(&field.value)
                    .allow_empty(!required)
                    .validate_with(move |input: &String| validate_field(kind, required, input))
                    .interact_text()
                    .with_context(|| format!("Failed to read {}", field.name))?
            }
        };
        values.set(field.name.as_str(), value);
    }

    Ok(values)
}

/// Check one input against its field kind
pub fn validate_field(kind: FieldKind, required: bool, input: &str) -> Result<(), String> {
    let input = input.trim();
    if input.is_empty() {
        return if required {
            Err("This field is required".to_string())
        } else {
            Ok(())
        };
    }

    match kind {
        FieldKind::Email if !is_plausible_email(input) => {
            Err("Enter a valid email address".to_string())
        }
        FieldKind::Date if NaiveDate::parse_from_str(input, "%Y-%m-%d").is_err() => {
            Err("Use the YYYY-MM-DD format".to_string())
        }
        _ => Ok(()),
    }
}

fn is_plausible_email(input: &str) -> bool {
    match input.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Ask for whichever login values were not given on the command line
pub fn prompt_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    let username = match username {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?,
    };
    Ok((username, password))
}
