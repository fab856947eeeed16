//! Status line widget.
//!
//! One row at the bottom of the screen: a left-aligned summary of where the
//! cursor is and a right-aligned message (errors, apply results).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Status line contents.
///
/// # Design
///
/// Pure and stateless: the app formats `summary` and keeps `message` until
/// the next key press.
#[derive(Debug, Clone)]
pub struct StatusLine<'a> {
    summary: &'a str,
    message: Option<&'a str>,
    style: Style,
}

impl<'a> StatusLine<'a> {
    /// Create a status line.
    ///
    /// # Arguments
    ///
    /// * `summary` - Left-aligned text
    /// * `message` - Optional right-aligned text
    /// * `style` - Style for the whole row
    pub fn new(summary: &'a str, message: Option<&'a str>, style: Style) -> Self {
        Self {
            summary,
            message,
            style,
        }
    }

    /// Render as a single `Line` padded to `width` cells.
    ///
    /// # Behavior
    ///
    /// - The message is right-aligned with at least one space before it
    /// - When both don't fit, the summary wins and the message is dropped
    pub fn to_line(&self, width: u16) -> Line<'a> {
        let width = usize::from(width);
        let summary_width = self.summary.width();
        let mut spans = vec![Span::styled(self.summary, self.style)];
        match self.message {
            Some(message) if summary_width + 1 + message.width() <= width => {
                let gap = width - summary_width - message.width();
                spans.push(Span::styled(" ".repeat(gap), self.style));
                spans.push(Span::styled(message, self.style));
            }
            _ => {
                let gap = width.saturating_sub(summary_width);
                spans.push(Span::styled(" ".repeat(gap), self.style));
            }
        }
        Line::from(spans)
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = self.to_line(area.width);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ===== Tests =====
