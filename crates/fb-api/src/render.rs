//! Body text rendering and small presentation helpers.

use chrono::{DateTime, Utc};
use fb_configs::Settings;
use fb_core::models::Role;
use fb_core::traits::PostRenderer;

/// Escape-then-format renderer: HTML is escaped to prevent XSS, blank lines
/// start a new paragraph, single newlines become line breaks. A richer
/// Markdown collaborator can be swapped in behind the same port.
pub struct EscapeRenderer;

impl PostRenderer for EscapeRenderer {
    fn render(&self, raw: &str) -> String {
        let escaped = html_escape::encode_safe(raw).to_string();
        let paragraphs: Vec<String> = escaped
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .map(|p| format!("<p>{}</p>", p.trim().replace('\n', "<br />")))
            .collect();
        paragraphs.join("\n")
    }
}

/// The role colour configured for a given privilege level.
pub fn role_colour(role: Role, settings: &Settings) -> String {
    match role {
        Role::Member => settings.board_user_role_colour.clone(),
        Role::Moderator => settings.board_moderator_role_colour.clone(),
        Role::Administrator => settings.board_admin_role_colour.clone(),
    }
}

/// en-GB style display date, matching the forum's original presentation.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_escapes_markup() {
        let html = EscapeRenderer.render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn renderer_builds_paragraphs_and_breaks() {
        let html = EscapeRenderer.render("first\nline\n\nsecond");
        assert_eq!(html, "<p>first<br />line</p>\n<p>second</p>");
    }

    #[test]
    fn renderer_drops_empty_paragraphs() {
        let html = EscapeRenderer.render("\n\n\n\nonly\n\n\n");
        assert_eq!(html, "<p>only</p>");
    }
}
