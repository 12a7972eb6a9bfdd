//! Buttons and option selectors.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

/// Renders a bordered, centered button.
///
/// A disabled button is drawn dimmed and never highlighted.
pub fn render_button(label: &str, focused: bool, enabled: bool, area: Rect, buf: &mut Buffer) {
    let (border, text) = match (enabled, focused) {
        (false, _) => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        ),
        (true, true) => (
            Style::default().fg(Color::Yellow),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        (true, false) => (
            Style::default().fg(Color::LightYellow),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
    };
    Paragraph::new(Line::from(Span::styled(format!(" {label} "), text)))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border),
        )
        .render(area, buf);
}

/// Renders a bordered selector showing `value` between arrows.
pub fn render_choice(label: &str, value: &str, focused: bool, area: Rect, buf: &mut Buffer) {
    let border_color = if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let arrow = Style::default().fg(if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    });
    Paragraph::new(Line::from(vec![
        Span::styled("‹ ", arrow),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
        Span::styled(" ›", arrow),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Gray),
            )),
    )
    .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn button_centers_label() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        render_button("Pay", true, true, area, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains(" Pay "));
        assert_eq!(buf[(9, 1)].bg, Color::Yellow);
    }

    #[test]
    fn disabled_button_is_dimmed() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        render_button("Pay", true, false, area, &mut buf);
        assert_eq!(buf[(9, 1)].fg, Color::DarkGray);
        assert_eq!(buf[(9, 1)].bg, Color::Reset);
    }

    #[test]
    fn choice_shows_value_between_arrows() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        render_choice("Guests", "2", false, area, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Guests"));
        assert!(content.contains("‹ 2 ›"));
    }

    #[test]
    fn snapshot_button() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        render_button("Pay", false, true, area, &mut buf);
        assert_eq!(buf[(5, 1)].fg, Color::LightYellow);
        assert_eq!(buf[(0, 0)].fg, Color::LightYellow);

        insta::assert_snapshot!(buffer_to_string(&buf), @r"
        ╭──────────╮
        │    Pay   │
        ╰──────────╯
        ");
    }

    #[test]
    fn snapshot_choice() {
        let area = Rect::new(0, 0, 16, 3);
        let mut buf = Buffer::empty(area);
        render_choice("Guests", "2", true, area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Yellow);
        assert_eq!(buf[(8, 1)].fg, Color::White);

        insta::assert_snapshot!(buffer_to_string(&buf), @r"
        ╭ Guests ──────╮
        │     ‹ 2 ›    │
        ╰──────────────╯
        ");
    }
}
