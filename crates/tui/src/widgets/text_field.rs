//! Single-line text input.

use beiramar_protocol::Message;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

/// Rewrites the whole value after each edit, e.g. to group card digits.
pub type Formatter = fn(&str) -> String;

/// An editable line of text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Byte offset of the cursor within `value`.
    cursor: usize,
    masked: bool,
    formatter: Option<Formatter>,
}

impl TextInput {
    /// An empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An input pre-filled with `value`, cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            cursor: value.len(),
            value,
            ..Self::default()
        }
    }

    /// Hides the characters when rendered.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Applies `formatter` after every edit.
    #[must_use]
    pub fn formatted(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// The current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the text and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.set_value(String::new());
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.reformat();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_boundary = self.value[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i);
        self.value.remove(prev_boundary);
        self.cursor = prev_boundary;
        self.reformat();
    }

    /// Moves the cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.value[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i);
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.value[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Applies an editing message.
    ///
    /// Returns `false` for messages that do not edit text.
    pub fn edit(&mut self, msg: &Message) -> bool {
        match msg {
            Message::Input { ch } => self.insert_char(*ch),
            Message::Backspace => self.backspace(),
            Message::NavigateLeft => self.move_left(),
            Message::NavigateRight => self.move_right(),
            _ => return false,
        }
        true
    }

    fn reformat(&mut self) {
        if let Some(formatter) = self.formatter {
            self.set_value(formatter(&self.value));
        }
    }
}

/// Renders a bordered text field with `label` as its title.
///
/// Shows `placeholder` while empty, and a block cursor when focused.
pub fn render_text_field(
    input: &TextInput,
    label: &str,
    placeholder: &str,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_color = if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {label} "),
            Style::default().fg(Color::Gray),
        ));

    let line = if input.value.is_empty() && !focused {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                placeholder.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        let shown = if input.masked {
            "•".repeat(input.value.chars().count())
        } else {
            input.value.clone()
        };
        let mut spans = vec![Span::raw(" ")];
        if focused {
            // Masked text has one bullet per character, so count characters.
            let split = input.value[..input.cursor].chars().count();
            let before: String = shown.chars().take(split).collect();
            let mut rest = shown.chars().skip(split);
            let at = rest.next().map_or_else(|| " ".to_string(), String::from);
            let after: String = rest.collect();
            spans.push(Span::styled(before, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                at,
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
            spans.push(Span::styled(after, Style::default().fg(Color::White)));
        } else {
            spans.push(Span::styled(shown, Style::default().fg(Color::White)));
        }
        Line::from(spans)
    };

    Paragraph::new(line).block(block).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use beiramar_protocol::booking::format_card_number;

    #[test]
    fn insert_and_backspace() {
        let mut input = TextInput::new();
        for ch in "olá".chars() {
            input.insert_char(ch);
        }
        assert_eq!(input.value(), "olá");
        assert_eq!(input.cursor(), "olá".len());

        input.backspace();
        assert_eq!(input.value(), "ol");
        input.backspace();
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn edit_applies_only_editing_messages() {
        let mut input = TextInput::with_value("ab");
        assert!(input.edit(&Message::NavigateLeft));
        assert!(input.edit(&Message::Input { ch: 'x' }));
        assert_eq!(input.value(), "axb");
        assert!(!input.edit(&Message::Select));
        assert_eq!(input.value(), "axb");
    }

    #[test]
    fn cursor_moves_by_characters() {
        let mut input = TextInput::with_value("ação");
        input.move_left();
        input.move_left();
        input.insert_char('X');
        assert_eq!(input.value(), "açXão");

        input.move_right();
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor(), input.value().len());
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut input = TextInput::new();
        input.insert_char('\t');
        assert_eq!(input.value(), "");
    }

    #[test]
    fn formatter_runs_after_each_edit() {
        let mut input = TextInput::new().formatted(format_card_number);
        for ch in "42424242x4".chars() {
            input.insert_char(ch);
        }
        assert_eq!(input.value(), "4242 4242 4");
        input.backspace();
        assert_eq!(input.value(), "4242 4242");
    }

    #[test]
    fn render_shows_placeholder_when_empty() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        render_text_field(&TextInput::new(), "Email", "you@example.com", false, area, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Email"));
        assert!(content.contains("you@example.com"));
    }

    #[test]
    fn render_masks_passwords() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let input = TextInput::with_value("secret").masked();
        render_text_field(&input, "Password", "", false, area, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains("••••••"));
        assert!(!content.contains("secret"));
    }
}
