//! Table drawing from a negotiated column plan.

use super::styles::ViewStyles;
use crate::view_state::{truncate_to_width, TableSource, TableViewState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Glyph for the header underline.
pub const UNDERLINE: &str = "─";

/// Header, optional underline and data rows of a table view.
pub struct TableView<'a> {
    source: &'a dyn TableSource,
    state: &'a TableViewState,
    styles: &'a ViewStyles,
}

impl<'a> TableView<'a> {
    /// Draw `source` as laid out by `state`.
    pub fn new(source: &'a dyn TableSource, state: &'a TableViewState, styles: &'a ViewStyles) -> Self {
        Self {
            source,
            state,
            styles,
        }
    }
}

impl Widget for TableView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plan = self.state.plan(self.source);
        let style = self.state.style();
        let mut y = area.y;
        let bottom = area.bottom();

        if style.show_header && y < bottom {
            for column in plan.iter() {
                let name = truncate_to_width(self.source.column_name(column.column), usize::from(column.width));
                buf.set_stringn(
                    area.x + column.x,
                    y,
                    name,
                    usize::from(column.width),
                    self.styles.header,
                );
            }
            y += 1;
            if style.header_underline && y < bottom {
                let width = plan.used_width().min(area.width);
                buf.set_string(area.x, y, UNDERLINE.repeat(usize::from(width)), self.styles.header);
                y += 1;
            }
        }

        let selected = self.state.selected();
        for row in self.state.visible_rows(self.source) {
            if y >= bottom {
                break;
            }
            for column in plan.iter() {
                let text = self.state.cell_text(self.source, row, column.column, column.width);
                let cell_style = if row == selected.row && column.column == selected.column {
                    self.styles.selected
                } else {
                    Style::default()
                };
                if cell_style != Style::default() {
                    buf.set_style(Rect::new(area.x + column.x, y, column.width, 1), cell_style);
                }
                buf.set_stringn(area.x + column.x, y, &text, usize::from(column.width), cell_style);
            }
            y += 1;
        }
    }
}

// ===== Tests =====
