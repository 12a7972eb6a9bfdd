//! Helpers shared by the rendering tests.

use ratatui::buffer::Buffer;

/// Renders a buffer as text, one line per row, with trailing spaces trimmed.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| {
            let row: String = (0..buf.area.width)
                .filter_map(|x| buf.cell((buf.area.x + x, buf.area.y + y)))
                .map(|cell| cell.symbol())
                .collect();
            format!("{}\n", row.trim_end_matches(' '))
        })
        .collect()
}

/// Finds the position of the first cell where `needle` starts.
///
/// Only single-width symbols are matched, which covers every label the
/// screens print.
#[must_use]
pub(crate) fn find_text(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    let area = buf.area;
    (area.y..area.bottom()).find_map(|y| {
        let symbols: Vec<&str> = (area.x..area.right())
            .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol()))
            .collect();
        let chars: Vec<String> = needle.chars().map(String::from).collect();
        symbols
            .windows(chars.len())
            .position(|window| window.iter().zip(&chars).all(|(a, b)| *a == b.as_str()))
            .and_then(|offset| u16::try_from(offset).ok())
            .map(|offset| (area.x + offset, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    #[test]
    fn buffer_to_string_trims_rows() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        buf.set_string(1, 1, "Lisboa", Style::default());
        assert_eq!(buffer_to_string(&buf), "\n Lisboa\n");
    }

    #[test]
    fn find_text_reports_start_cell() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 3));
        buf.set_string(4, 2, "Porto", Style::default());
        assert_eq!(find_text(&buf, "Porto"), Some((4, 2)));
        assert_eq!(find_text(&buf, "Faro"), None);
    }
}
