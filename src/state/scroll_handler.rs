//! Keyboard and mouse handling for a free-scrolling viewport.
//!
//! Pure functions over a [`ViewportScroller`]: no terminal I/O. Mouse
//! coordinates are absolute terminal cells; `area` is the rectangle the
//! component was drawn into (bars included).

use crate::model::{ComponentId, KeyAction};
use crate::state::grab::{GrabInfo, PointerGrab};
use crate::view_state::{Axis, BarHit, ViewportScroller};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Handle a navigation action.
///
/// # Arguments
/// * `scroller` - The viewport to move
/// * `action` - Action resolved from the key bindings
///
/// # Returns
/// `true` if the offset changed. Non-navigation actions return `false`.
pub fn handle_scroll_action(scroller: &mut ViewportScroller, action: KeyAction) -> bool {
    match action {
        KeyAction::ScrollUp => scroller.line_up(),
        KeyAction::ScrollDown => scroller.line_down(),
        KeyAction::ScrollLeft => scroller.column_left(),
        KeyAction::ScrollRight => scroller.column_right(),
        KeyAction::PageUp => scroller.page(Axis::Vertical, false),
        KeyAction::PageDown => scroller.page(Axis::Vertical, true),
        KeyAction::ScrollToTop => scroller.to_top(),
        KeyAction::ScrollToBottom => scroller.to_bottom(),
        KeyAction::LineStart => scroller.to_left_edge(),
        KeyAction::LineEnd => scroller.to_right_edge(),
        _ => false,
    }
}

/// Where a screen cell falls on one of the scroller's bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarTarget {
    /// Which bar.
    pub axis: Axis,
    /// Part of the bar under the pointer.
    pub hit: BarHit,
    /// Pointer coordinate along the bar's axis (absolute).
    pub along: u16,
}

/// Hit-test the scroller's visible bars.
///
/// The vertical bar occupies the column right of the content area, the
/// horizontal bar the row below it. The corner cell belongs to neither.
pub fn bar_at(scroller: &ViewportScroller, area: Rect, column: u16, row: u16) -> Option<BarTarget> {
    if !area.contains((column, row).into()) {
        return None;
    }
    let content = scroller.content_area();
    let rel_x = column - area.x;
    let rel_y = row - area.y;

    let vertical = scroller.bar(Axis::Vertical);
    if vertical.is_visible() && rel_x == content.width && rel_y < content.height {
        return vertical.hit(usize::from(rel_y)).map(|hit| BarTarget {
            axis: Axis::Vertical,
            hit,
            along: row,
        });
    }
    let horizontal = scroller.bar(Axis::Horizontal);
    if horizontal.is_visible() && rel_y == content.height && rel_x < content.width {
        return horizontal.hit(usize::from(rel_x)).map(|hit| BarTarget {
            axis: Axis::Horizontal,
            hit,
            along: column,
        });
    }
    None
}

/// Handle a mouse event for a scroller drawn into `area`.
///
/// # Arguments
/// * `scroller` - The viewport to move
/// * `grab` - Shared pointer grab
/// * `id` - This component's id, used as the grab owner
/// * `area` - Where the component was drawn
/// * `event` - The crossterm mouse event
/// * `wheel_lines` - Lines moved per wheel notch
///
/// # Behavior
/// - Wheel inside `area` scrolls by `wheel_lines` (horizontal wheel scrolls
///   columns)
/// - Left press on a thumb takes the grab; on the track it pages toward
///   the pointer
/// - Drags move the thumb only while this component holds the grab
/// - Release drops the grab
///
/// # Returns
/// `true` if the offset changed.
pub fn handle_scroll_mouse(
    scroller: &mut ViewportScroller,
    grab: &mut PointerGrab,
    id: ComponentId,
    area: Rect,
    event: MouseEvent,
    wheel_lines: usize,
) -> bool {
    let inside = area.contains((event.column, event.row).into());
    let lines = wheel_lines as isize;
    match event.kind {
        MouseEventKind::ScrollDown if inside => scroller.scroll_by(0, lines),
        MouseEventKind::ScrollUp if inside => scroller.scroll_by(0, -lines),
        MouseEventKind::ScrollRight if inside => scroller.scroll_by(lines, 0),
        MouseEventKind::ScrollLeft if inside => scroller.scroll_by(-lines, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(target) = bar_at(scroller, area, event.column, event.row) else {
                return false;
            };
            match target.hit {
                BarHit::Thumb => {
                    grab.grab(GrabInfo {
                        owner: id,
                        axis: target.axis,
                        anchor: target.along,
                    });
                    false
                }
                BarHit::BeforeThumb => scroller.page(target.axis, false),
                BarHit::AfterThumb => scroller.page(target.axis, true),
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(info) = grab.held_by(id) else {
                return false;
            };
            let along = match info.axis {
                Axis::Vertical => event.row,
                Axis::Horizontal => event.column,
            };
            let delta = i32::from(along) - i32::from(info.anchor);
            if delta == 0 {
                return false;
            }
            info.anchor = along;
            let axis = info.axis;
            scroller.set_offset_from_bar_drag(axis, delta)
        }
        MouseEventKind::Up(MouseButton::Left) => {
            grab.release(id);
            false
        }
        _ => false,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
