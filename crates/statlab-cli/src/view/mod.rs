//! Charts drawn as plain text
//!
//! Widgets render into an off-screen [`Buffer`] which is then flattened into
//! lines, so reports can be printed to any terminal or redirected to a file.

use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    widgets::Widget,
};

pub mod widgets;

/// Renders `widget` into a `width` × `height` buffer and returns its text,
/// one line per row with trailing blanks removed.
pub fn render_to_string<W>(widget: W, width: u16, height: u16) -> String
where
    W: Widget,
{
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_string(&buf)
}

fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);
    let mut out = String::new();
    for row in buf.content.chunks(width) {
        let line = row.iter().map(Cell::symbol).collect::<String>();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use ratatui::{text::Line, widgets::Paragraph};

    use super::*;

    #[test]
    fn test_render_trims_trailing_blanks() {
        let text = render_to_string(Paragraph::new(vec![Line::raw("ab"), Line::raw("c")]), 6, 3);
        assert_eq!(text, "ab\nc\n\n");
    }

    #[test]
    fn test_render_empty_area() {
        assert_eq!(render_to_string(Paragraph::new("x"), 0, 0), "");
    }
}
