//! Keyboard and mouse handling for a hex view.
//!
//! Typing depends on the pane: hex digits edit nibbles in the hex pane,
//! printable ASCII edits whole bytes in the text pane. Everything else goes
//! through the key bindings.

use crate::model::{CoreError, KeyAction};
use crate::view_state::{HexViewState, Side};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::io::{Read, Seek, Write};

/// Handle a hex view action.
///
/// # Errors
/// Propagates stream failures from reading bytes or applying edits.
///
/// # Returns
/// `true` if anything on screen changed.
pub fn handle_hex_action<S: Read + Write + Seek>(
    view: &mut HexViewState<S>,
    action: KeyAction,
) -> Result<bool, CoreError> {
    let changed = match action {
        KeyAction::ScrollUp => view.move_up(),
        KeyAction::ScrollDown => view.move_down(),
        KeyAction::ScrollLeft => view.move_left(),
        KeyAction::ScrollRight => view.move_right(),
        KeyAction::PageUp => view.page_up(),
        KeyAction::PageDown => view.page_down(),
        KeyAction::ScrollToTop => view.move_start(),
        KeyAction::ScrollToBottom => view.move_end(),
        KeyAction::LineStart => {
            let line = view.bytes_per_line() as u64;
            view.set_position(view.position() - view.position() % line)
        }
        KeyAction::LineEnd => {
            let line = view.bytes_per_line() as u64;
            view.set_position(view.position() - view.position() % line + line - 1)
        }
        KeyAction::ToggleSide => {
            view.toggle_side();
            true
        }
        KeyAction::ApplyEdits => view.apply_edits()? > 0,
        KeyAction::DiscardEdits => view.discard_edits() > 0,
        _ => false,
    };
    Ok(changed)
}

/// Handle a typed character.
///
/// # Returns
/// `Ok(true)` if the character edited a byte, `Ok(false)` if it means
/// nothing in the current pane (the caller may then try the key bindings).
pub fn handle_hex_char<S: Read + Seek>(
    view: &mut HexViewState<S>,
    ch: char,
) -> Result<bool, CoreError> {
    match view.side() {
        Side::Hex => match ch.to_digit(16) {
            Some(nibble) => view.write_nibble(nibble as u8),
            None => Ok(false),
        },
        Side::Text if ch.is_ascii() && !ch.is_ascii_control() => view.write_char(ch as u8),
        Side::Text => Ok(false),
    }
}

/// Handle a mouse event for a hex view drawn into `area`.
///
/// Wheel moves the cursor by lines (the window follows); a left click puts
/// the cursor on the byte under the pointer, switching panes if needed.
pub fn handle_hex_mouse<S: Read + Seek>(
    view: &mut HexViewState<S>,
    area: Rect,
    event: MouseEvent,
    wheel_lines: usize,
) -> bool {
    if !area.contains((event.column, event.row).into()) {
        return false;
    }
    match event.kind {
        MouseEventKind::ScrollDown => (0..wheel_lines).fold(false, |moved, _| view.move_down() || moved),
        MouseEventKind::ScrollUp => (0..wheel_lines).fold(false, |moved, _| view.move_up() || moved),
        MouseEventKind::Down(MouseButton::Left) => {
            view.click(event.column - area.x, event.row - area.y)
        }
        _ => false,
    }
}
