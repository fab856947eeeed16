//! Plain text drawn through a viewport scroller.

use super::scrollbar::ScrollBars;
use super::styles::ViewStyles;
use crate::view_state::ViewportScroller;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// Lines shown through a [`ViewportScroller`], with its scroll bars.
pub struct TextView<'a> {
    lines: &'a [String],
    scroller: &'a ViewportScroller,
    styles: &'a ViewStyles,
}

impl<'a> TextView<'a> {
    /// View over `lines` positioned by `scroller`.
    pub fn new(lines: &'a [String], scroller: &'a ViewportScroller, styles: &'a ViewStyles) -> Self {
        Self {
            lines,
            scroller,
            styles,
        }
    }
}

impl Widget for TextView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let window = self.scroller.visible_window();
        for (row, line) in self.lines.iter().skip(window.y).take(window.height).enumerate() {
            let visible = slice_columns(line, window.x, window.width);
            buf.set_stringn(
                area.x,
                area.y + row as u16,
                &visible,
                window.width,
                Style::default(),
            );
        }
        ScrollBars::new(self.scroller, self.styles).render(area, buf);
    }
}

/// The part of `line` between display columns `start` and `start + width`.
///
/// A double-width character cut by the left edge becomes a space; one cut
/// by the right edge is dropped.
pub fn slice_columns(line: &str, start: usize, width: usize) -> String {
    let end = start + width;
    let mut out = String::new();
    let mut column = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if column >= end {
            break;
        }
        if column < start {
            if column + w > start {
                out.extend(std::iter::repeat(' ').take(column + w - start));
            }
        } else if column + w <= end {
            out.push(ch);
        } else {
            break;
        }
        column += w;
    }
    out
}

// ===== Tests =====
