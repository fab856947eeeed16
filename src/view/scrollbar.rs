//! Scroll bar drawing.
//!
//! Bars occupy the last column (vertical) and last row (horizontal) of a
//! scroller's viewport. When both are shown the bottom-right corner cell is
//! left blank.

use super::styles::ViewStyles;
use crate::view_state::{Axis, ScrollBarState, ViewportScroller};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Track glyph for a vertical bar.
pub const VERTICAL_TRACK: &str = "│";
/// Track glyph for a horizontal bar.
pub const HORIZONTAL_TRACK: &str = "─";
/// Thumb glyph for either bar.
pub const THUMB: &str = "█";

/// Both scroll bars of one scroller.
pub struct ScrollBars<'a> {
    scroller: &'a ViewportScroller,
    styles: &'a ViewStyles,
}

impl<'a> ScrollBars<'a> {
    /// Bars for `scroller`, drawn into the scroller's full viewport area.
    pub fn new(scroller: &'a ViewportScroller, styles: &'a ViewStyles) -> Self {
        Self { scroller, styles }
    }
}

impl Widget for ScrollBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content = self.scroller.content_area();
        let vertical = self.scroller.bar(Axis::Vertical);
        if vertical.is_visible() {
            let origin = (area.x + content.width, area.y);
            render_bar(vertical, origin, buf, self.styles);
        }
        let horizontal = self.scroller.bar(Axis::Horizontal);
        if horizontal.is_visible() {
            let origin = (area.x, area.y + content.height);
            render_bar(horizontal, origin, buf, self.styles);
        }
        if self.scroller.has_corner() {
            let corner = (area.x + content.width, area.y + content.height);
            if let Some(cell) = buf.cell_mut(corner) {
                cell.set_symbol(" ").set_style(Style::default());
            }
        }
    }
}

/// Draw one bar starting at `origin` and running along its axis.
pub fn render_bar(bar: &ScrollBarState, origin: (u16, u16), buf: &mut Buffer, styles: &ViewStyles) {
    let thumb = bar.thumb_cells().unwrap_or(0..0);
    let track = match bar.axis() {
        Axis::Vertical => VERTICAL_TRACK,
        Axis::Horizontal => HORIZONTAL_TRACK,
    };
    for i in 0..bar.track_len() {
        let step = i as u16;
        let position = match bar.axis() {
            Axis::Vertical => (origin.0, origin.1 + step),
            Axis::Horizontal => (origin.0 + step, origin.1),
        };
        let Some(cell) = buf.cell_mut(position) else {
            continue;
        };
        if thumb.contains(&i) {
            cell.set_symbol(THUMB).set_style(styles.bar_thumb);
        } else {
            cell.set_symbol(track).set_style(styles.bar_track);
        }
    }
}

// ===== Tests =====
