//! Help overlay widget.
//!
//! This module provides the help overlay that lists the key bindings when the
//! user presses `?`, in the interface language.

use beiramar_protocol::Language;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 64;

/// The height of the help overlay panel.
const HELP_HEIGHT: u16 = 17;

/// Renders a centered help overlay displaying the key bindings.
///
/// The overlay is rendered on top of the existing content, clearing the
/// area behind it first.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::Language;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use beiramar_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(Language::En, area, &mut buf);
/// ```
pub fn render_help_overlay(lang: Language, area: Rect, buf: &mut Buffer) {
    let panel = panel_area(area);
    Clear.render(panel, buf);

    let help_block = Block::default()
        .title(Span::styled(
            format!(" {} ", lang.t("help", "title")),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(build_help_lines(lang))
        .block(help_block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .render(panel, buf);
}

/// Builds the lines of help content.
fn build_help_lines(lang: Language) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let note_style = Style::default().fg(Color::Gray);

    let binding = |keys: &str, key: &str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<14}"), key_style),
            Span::styled(lang.t("help", key).to_string(), text_style),
        ])
    };
    let note = |key: &str| Line::from(Span::styled(format!("  {}", lang.t("help", key)), note_style));

    vec![
        Line::from(""),
        binding("Tab ↑ ↓", "navigate"),
        binding("Enter", "select"),
        binding("Esc", "back"),
        binding("l", "language"),
        binding("Ctrl+C", "quit"),
        Line::from(""),
        note("pages"),
        note("account"),
        note("lists"),
        note("calendar"),
    ]
}

/// The panel area, centered and clamped to `area`.
fn panel_area(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(HELP_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [panel] = Layout::horizontal([Constraint::Length(HELP_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn panel_is_centered_in_large_areas() {
        let area = Rect::new(0, 0, 120, 41);
        let panel = panel_area(area);

        assert_eq!((panel.width, panel.height), (HELP_WIDTH, HELP_HEIGHT));
        assert_eq!(panel.x, (120 - HELP_WIDTH) / 2);
        assert_eq!(panel.y, (41 - HELP_HEIGHT) / 2);
    }

    #[test]
    fn panel_is_clamped_to_small_areas() {
        let area = Rect::new(0, 0, 40, 12);
        assert_eq!(panel_area(area), area);
    }

    #[test]
    fn render_help_overlay_is_translated() {
        let area = Rect::new(0, 0, 80, 24);

        let mut buf = Buffer::empty(area);
        render_help_overlay(Language::En, area, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Help"));
        assert!(content.contains("Switch language"));

        let mut buf = Buffer::empty(area);
        render_help_overlay(Language::Pt, area, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Ajuda"));
        assert!(content.contains("Mudar idioma"));
    }

    #[test]
    fn render_help_overlay_handles_small_area() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);

        render_help_overlay(Language::En, area, &mut buf);
    }

    #[test]
    fn build_help_lines_contains_all_keybindings() {
        let content: String = build_help_lines(Language::En)
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(content.contains("Tab"));
        assert!(content.contains("Enter"));
        assert!(content.contains("Esc"));
        assert!(content.contains("Ctrl+C"));
        assert!(content.contains("PgUp/PgDn"));
        assert!(content.contains("1 home"));
    }
}
