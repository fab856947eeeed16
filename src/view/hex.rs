//! Hex/ASCII drawing of the rows a hex view read from its stream.

use super::styles::ViewStyles;
use crate::view_state::{hex_column, text_column, HexCell, HexRow, Side};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

/// Address column, hex pane and text pane for one page of bytes.
pub struct HexView<'a> {
    rows: &'a [HexRow],
    bytes_per_line: usize,
    side: Side,
    styles: &'a ViewStyles,
}

impl<'a> HexView<'a> {
    /// Draw `rows`, highlighting the cursor strongest in the active `side`.
    pub fn new(rows: &'a [HexRow], bytes_per_line: usize, side: Side, styles: &'a ViewStyles) -> Self {
        Self {
            rows,
            bytes_per_line,
            side,
            styles,
        }
    }

    fn cell_style(&self, cell: &HexCell, pane: Side) -> Style {
        if cell.selected {
            if pane == self.side {
                self.styles.selected
            } else {
                Style::default().add_modifier(Modifier::UNDERLINED)
            }
        } else if cell.edited {
            self.styles.edited
        } else {
            Style::default()
        }
    }
}

impl Widget for HexView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (line, row) in self.rows.iter().take(usize::from(area.height)).enumerate() {
            let y = area.y + line as u16;
            buf.set_stringn(
                area.x,
                y,
                format!("{:08x}", row.address),
                usize::from(area.width),
                self.styles.address,
            );
            for (index, cell) in row.cells.iter().enumerate() {
                let hex_x = hex_column(index);
                if hex_x + 2 <= area.width {
                    let style = self.cell_style(cell, Side::Hex);
                    buf.set_string(area.x + hex_x, y, format!("{:02x}", cell.value), style);
                }
                let text_x = text_column(index, self.bytes_per_line);
                if text_x < area.width {
                    let style = self.cell_style(cell, Side::Text);
                    buf.set_string(area.x + text_x, y, printable(cell.value).to_string(), style);
                }
            }
        }
    }
}

/// Text pane glyph: printable ASCII as itself, everything else as `.`.
pub fn printable(value: u8) -> char {
    if value.is_ascii_graphic() || value == b' ' {
        char::from(value)
    } else {
        '.'
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::buffer_to_string;
    use crate::view::styles::ColorConfig;
    use crate::view_state::HexViewState;
    use std::io::Cursor;

    fn render(view: &mut HexViewState<Cursor<Vec<u8>>>, width: u16, height: u16) -> String {
        let styles = ViewStyles::with_color_config(ColorConfig::fixed(false));
        let rows = view.read_window().unwrap();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        HexView::new(&rows, view.bytes_per_line(), view.side(), &styles).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn printable_maps_controls_to_dots() {
        assert_eq!(printable(b'A'), 'A');
        assert_eq!(printable(b' '), ' ');
        assert_eq!(printable(0x00), '.');
        assert_eq!(printable(0x7f), '.');
        assert_eq!(printable(0xe9), '.');
    }

    #[test]
    fn two_blocks_per_line() {
        let mut view = HexViewState::new(Cursor::new(b"Hello, world!\n".to_vec())).unwrap();
        view.set_viewport_size(43, 2);
        insta::assert_snapshot!(render(&mut view, 43, 2), @r"
        00000000 48 65 6c 6c  6f 2c 20 77  Hello, w
        00000008 6f 72 6c 64  21 0a        orld!.
        ");
    }

    #[test]
    fn pending_edits_are_drawn() {
        let mut view = HexViewState::new(Cursor::new(vec![0u8; 4])).unwrap();
        view.set_viewport_size(26, 1);
        view.write_nibble(4).unwrap();
        view.write_nibble(1).unwrap();
        insta::assert_snapshot!(render(&mut view, 26, 1), @"00000000 41 00 00 00  A...");
    }
}
