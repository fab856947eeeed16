//! 2D viewport scroller with auto-hiding scroll bars.
//!
//! Keeps a [`ViewportOffset`] into a [`ContentExtent`] and the two
//! [`ScrollBarState`]s consistent with it. Every input is clamped; nothing
//! here fails.
//!
//! # Clamping
//! After any mutation, on each axis:
//! `0 <= offset <= max(0, extent - available)`, where `available` is the
//! viewport length minus the cell reserved by the other axis' bar.

use super::scrollbar::{ScrollBarPolicy, ScrollBarState};
use super::types::{offset_by, Axis, ContentExtent, ViewportOffset, ViewportSize, VisibleWindow};
use crate::model::Change;
use tracing::debug;

/// Notifications emitted by [`ViewportScroller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The visible window moved.
    OffsetChanged(Change<ViewportOffset>),
}

/// Viewport over a 2D content rectangle.
#[derive(Debug, Clone)]
pub struct ViewportScroller {
    viewport: ViewportSize,
    extent: ContentExtent,
    offset: ViewportOffset,
    vertical_policy: ScrollBarPolicy,
    horizontal_policy: ScrollBarPolicy,
    vertical: ScrollBarState,
    horizontal: ScrollBarState,
    events: Vec<ScrollEvent>,
    needs_display: bool,
}

impl Default for ViewportScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportScroller {
    /// A scroller with nothing laid out yet and auto-hiding bars.
    pub fn new() -> Self {
        Self {
            viewport: ViewportSize::default(),
            extent: ContentExtent::default(),
            offset: ViewportOffset::default(),
            vertical_policy: ScrollBarPolicy::Auto,
            horizontal_policy: ScrollBarPolicy::Auto,
            vertical: ScrollBarState::new(Axis::Vertical),
            horizontal: ScrollBarState::new(Axis::Horizontal),
            events: Vec::new(),
            needs_display: true,
        }
    }

    /// Same policy for both bars.
    pub fn with_policy(mut self, policy: ScrollBarPolicy) -> Self {
        self.vertical_policy = policy;
        self.horizontal_policy = policy;
        self.relayout();
        self
    }

    /// Set the bar policy of one axis.
    pub fn set_policy(&mut self, axis: Axis, policy: ScrollBarPolicy) {
        match axis {
            Axis::Vertical => self.vertical_policy = policy,
            Axis::Horizontal => self.horizontal_policy = policy,
        }
        self.relayout();
    }

    /// Screen size pushed by the host on resize.
    pub fn set_viewport_size(&mut self, width: u16, height: u16) {
        let size = ViewportSize::new(width, height);
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.needs_display = true;
        self.relayout();
    }

    /// Content size pushed by the host when content changes.
    ///
    /// An offset beyond the new maximum is pulled back in-bounds.
    pub fn set_content_extent(&mut self, width: usize, height: usize) {
        let extent = ContentExtent::new(width, height);
        if extent == self.extent {
            return;
        }
        self.extent = extent;
        self.needs_display = true;
        self.relayout();
    }

    /// Current viewport size.
    pub fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    /// Current content extent.
    pub fn content_extent(&self) -> ContentExtent {
        self.extent
    }

    /// Current offset.
    pub fn offset(&self) -> ViewportOffset {
        self.offset
    }

    /// Bar for one axis.
    pub fn bar(&self, axis: Axis) -> &ScrollBarState {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    /// Screen cells left for content after reserving visible bars.
    pub fn content_area(&self) -> ViewportSize {
        ViewportSize::new(
            self.viewport.width - u16::from(self.vertical.is_visible()),
            self.viewport.height - u16::from(self.horizontal.is_visible()),
        )
    }

    /// Whether the 1-cell corner between two visible bars is reserved.
    pub fn has_corner(&self) -> bool {
        self.vertical.is_visible() && self.horizontal.is_visible()
    }

    /// Largest valid offset on one axis.
    pub fn max_offset(&self, axis: Axis) -> usize {
        self.extent
            .along(axis)
            .saturating_sub(self.content_area().along(axis))
    }

    /// The model rectangle currently on screen.
    pub fn visible_window(&self) -> VisibleWindow {
        let area = self.content_area();
        VisibleWindow {
            x: self.offset.x,
            y: self.offset.y,
            width: area.width as usize,
            height: area.height as usize,
        }
    }

    /// Map a screen cell (relative to the viewport) to model coordinates.
    ///
    /// Returns `None` for cells on a bar or past the end of the content.
    pub fn model_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.content_area();
        if column >= area.width || row >= area.height {
            return None;
        }
        let x = self.offset.x + column as usize;
        let y = self.offset.y + row as usize;
        (x < self.extent.width && y < self.extent.height).then_some((x, y))
    }

    /// Add a delta to the offset, clamping each axis.
    ///
    /// Returns whether the visible window actually moved; false at either
    /// extremity and before the viewport has been laid out.
    pub fn scroll_by(&mut self, dx: isize, dy: isize) -> bool {
        if self.viewport.is_empty() {
            return false;
        }
        let target = ViewportOffset::new(offset_by(self.offset.x, dx), offset_by(self.offset.y, dy));
        self.set_offset(target)
    }

    /// Request an absolute offset; the scroller clamps it.
    pub fn scroll_to(&mut self, x: usize, y: usize) -> bool {
        if self.viewport.is_empty() {
            return false;
        }
        self.set_offset(ViewportOffset::new(x, y))
    }

    /// One line up.
    pub fn line_up(&mut self) -> bool {
        self.scroll_by(0, -1)
    }

    /// One line down.
    pub fn line_down(&mut self) -> bool {
        self.scroll_by(0, 1)
    }

    /// One column left.
    pub fn column_left(&mut self) -> bool {
        self.scroll_by(-1, 0)
    }

    /// One column right.
    pub fn column_right(&mut self) -> bool {
        self.scroll_by(1, 0)
    }

    /// One page along an axis; `forward` picks the direction.
    pub fn page(&mut self, axis: Axis, forward: bool) -> bool {
        let len = self.content_area().along(axis).max(1) as isize;
        let delta = if forward { len } else { -len };
        match axis {
            Axis::Vertical => self.scroll_by(0, delta),
            Axis::Horizontal => self.scroll_by(delta, 0),
        }
    }

    /// Jump to the first line, keeping the column.
    pub fn to_top(&mut self) -> bool {
        self.scroll_to(self.offset.x, 0)
    }

    /// Jump to the last page, keeping the column.
    pub fn to_bottom(&mut self) -> bool {
        self.scroll_to(self.offset.x, self.max_offset(Axis::Vertical))
    }

    /// Jump to the first column, keeping the line.
    pub fn to_left_edge(&mut self) -> bool {
        self.scroll_to(0, self.offset.y)
    }

    /// Jump to the last horizontal page, keeping the line.
    pub fn to_right_edge(&mut self) -> bool {
        self.scroll_to(self.max_offset(Axis::Horizontal), self.offset.y)
    }

    /// Translate a thumb drag of `screen_delta` cells into a content offset.
    ///
    /// No-op (false) when the bar has no track or the content is empty.
    ///
    /// A drag and its opposite drag return to the starting offset only while
    /// the thumb has its natural size (`track * track >= content`). Past that
    /// the thumb is held at one cell and its location is clamped to the last
    /// track cell, so a drag that starts near the end loses the clamped
    /// distance: track 11 over 1000 lines, offset 989, drag +1 then -1 lands
    /// on 818.
    pub fn set_offset_from_bar_drag(&mut self, axis: Axis, screen_delta: i32) -> bool {
        let bar = *self.bar(axis);
        let Some(location) = bar.thumb_location() else {
            return false;
        };
        let Some(position) = bar.offset_for_location(location + f64::from(screen_delta)) else {
            return false;
        };
        self.set_offset(self.offset.with(axis, position))
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<ScrollEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether something on screen changed since the last call.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    fn set_offset(&mut self, target: ViewportOffset) -> bool {
        let clamped = ViewportOffset::new(
            target.x.min(self.max_offset(Axis::Horizontal)),
            target.y.min(self.max_offset(Axis::Vertical)),
        );
        if clamped != target {
            debug!(?target, ?clamped, "scroll offset clamped");
        }
        let Some(change) = Change::between(self.offset, clamped) else {
            return false;
        };
        self.offset = clamped;
        self.sync_bars();
        self.events.push(ScrollEvent::OffsetChanged(change));
        self.needs_display = true;
        true
    }

    /// Resolve bar visibility, then pull the offset back in-bounds.
    fn relayout(&mut self) {
        let (show_vertical, show_horizontal) = self.resolve_bar_visibility();
        self.vertical.update(0, 0, 0, show_vertical);
        self.horizontal.update(0, 0, 0, show_horizontal);
        self.sync_bars();
        self.set_offset(self.offset);
    }

    fn resolve_bar_visibility(&self) -> (bool, bool) {
        if self.viewport.is_empty() {
            return (false, false);
        }
        let width = self.viewport.width as usize;
        let height = self.viewport.height as usize;
        let mut vertical = self.vertical_policy.shows(self.extent.height > height);
        let mut horizontal = self.horizontal_policy.shows(self.extent.width > width);
        // A bar taking a row/column can push the other axis into overflow.
        for _ in 0..2 {
            let available_width = width.saturating_sub(usize::from(vertical));
            let available_height = height.saturating_sub(usize::from(horizontal));
            vertical = self
                .vertical_policy
                .shows(self.extent.height > available_height);
            horizontal = self
                .horizontal_policy
                .shows(self.extent.width > available_width);
        }
        (vertical, horizontal)
    }

    fn sync_bars(&mut self) {
        let area = self.content_area();
        let vertical_visible = self.vertical.is_visible();
        let horizontal_visible = self.horizontal.is_visible();
        self.vertical.update(
            self.offset.y,
            self.extent.height,
            area.height as usize,
            vertical_visible,
        );
        self.horizontal.update(
            self.offset.x,
            self.extent.width,
            area.width as usize,
            horizontal_visible,
        );
    }
}

#[cfg(test)]
#[path = "scroller_tests.rs"]
mod tests;
