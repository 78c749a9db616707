// Text renderer for screens

use std::fmt::{self, Write};

use crate::views::{Block, FieldKind, Form, Screen};

/// Render a screen as plain text
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    if write_screen(&mut out, screen).is_err() {
        tracing::debug!("Screen render was cut short");
    }
    out
}

fn write_screen(out: &mut impl Write, screen: &Screen) -> fmt::Result {
    if let Some(ref title) = screen.title {
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(out)?;
    }

    for block in &screen.blocks {
        render_block(out, block)?;
    }

    Ok(())
}

fn render_block(out: &mut impl Write, block: &Block) -> fmt::Result {
    match block {
        Block::Paragraph(text) => writeln!(out, "{}", text),
        Block::Field { label, value } => writeln!(out, "{}: {}", label, value),
        Block::List(items) => {
            if items.is_empty() {
                writeln!(out, "  (none)")?;
            }
            for item in items {
                writeln!(out, "  - {}", item)?;
            }
            Ok(())
        }
        Block::Action { label, .. } => writeln!(out, "[{}]", label),
        Block::Form(form) => render_form(out, form),
        Block::Error(message) => writeln!(out, "{}", message),
    }
}

fn render_form(out: &mut impl Write, form: &Form) -> fmt::Result {
    for field in &form.fields {
        let value = match field.kind {
            FieldKind::Password => "*".repeat(field.value.chars().count()),
            _ => field.value.clone(),
        };
        let marker = if field.required { "" } else { " (optional)" };
        writeln!(out, "{}{}: {}", field.label, marker, value)?;
    }
    writeln!(out, "[{}]", form.submit_label)
}
