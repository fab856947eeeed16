//! Keyboard and mouse handling for a table view.

use crate::model::KeyAction;
use crate::view_state::{TableSource, TableViewState};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Handle a table action.
///
/// # Returns
/// `true` if the selection or offsets changed.
pub fn handle_table_action(
    view: &mut TableViewState,
    source: &dyn TableSource,
    action: KeyAction,
) -> bool {
    match action {
        KeyAction::ScrollUp => view.move_up(source),
        KeyAction::ScrollDown => view.move_down(source),
        KeyAction::ScrollLeft => view.move_left(source),
        KeyAction::ScrollRight => view.move_right(source),
        KeyAction::PageUp => view.page_up(source),
        KeyAction::PageDown => view.page_down(source),
        KeyAction::ScrollToTop => view.first_row(source),
        KeyAction::ScrollToBottom => view.last_row(source),
        KeyAction::LineStart => view.home(source),
        KeyAction::LineEnd => view.end(source),
        _ => false,
    }
}

/// Handle a mouse event for a table drawn into `area`.
///
/// Wheel scrolls rows; a left click selects the cell under the pointer.
/// Clicks on the header or on padding cells do nothing.
pub fn handle_table_mouse(
    view: &mut TableViewState,
    source: &dyn TableSource,
    area: Rect,
    event: MouseEvent,
    wheel_lines: usize,
) -> bool {
    if !area.contains((event.column, event.row).into()) {
        return false;
    }
    let lines = wheel_lines as isize;
    match event.kind {
        MouseEventKind::ScrollDown => view.scroll_by(source, lines),
        MouseEventKind::ScrollUp => view.scroll_by(source, -lines),
        MouseEventKind::Down(MouseButton::Left) => {
            match view.cell_at(source, event.column - area.x, event.row - area.y) {
                Some(cell) => view.set_selected(source, cell.row, cell.column),
                None => false,
            }
        }
        _ => false,
    }
}
