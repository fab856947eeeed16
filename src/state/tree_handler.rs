//! Keyboard and mouse handling for a tree view.
//!
//! Pure functions over a [`TreeViewState`] and the tree it shows.

use crate::model::KeyAction;
use crate::view_state::{Tree, TreeBuilder, TreeViewState};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Handle a tree action.
///
/// # Arguments
/// * `view` - Selection and window state
/// * `tree` - The tree being shown
/// * `builder` - Loads children on first expansion
/// * `action` - Action resolved from the key bindings
///
/// # Behavior
/// - Up/Down move the selection through visible nodes
/// - Left collapses (or climbs to the parent), Right expands (or enters)
/// - ExpandAll/CollapseAll act on loaded nodes; the root stays expanded
///
/// # Returns
/// `true` if anything on screen changed.
pub fn handle_tree_action<T>(
    view: &mut TreeViewState,
    tree: &mut Tree<T>,
    builder: &dyn TreeBuilder<T>,
    action: KeyAction,
) -> bool {
    match action {
        KeyAction::ScrollUp => view.select_previous(tree),
        KeyAction::ScrollDown => view.select_next(tree),
        KeyAction::ScrollLeft => view.cursor_left(tree),
        KeyAction::ScrollRight => view.cursor_right(tree, builder),
        KeyAction::PageUp => view.page_up(tree),
        KeyAction::PageDown => view.page_down(tree),
        KeyAction::ScrollToTop | KeyAction::LineStart => view.select_first(tree),
        KeyAction::ScrollToBottom | KeyAction::LineEnd => view.select_last(tree),
        KeyAction::ToggleExpand => view.toggle_selected(tree, builder),
        KeyAction::ToggleMark => view.toggle_mark_selected(tree),
        KeyAction::ExpandAll => {
            tree.expand_all();
            view.after_structure_change(tree);
            true
        }
        KeyAction::CollapseAll => {
            tree.collapse_all();
            view.after_structure_change(tree);
            true
        }
        _ => false,
    }
}

/// Handle a mouse event for a tree drawn into `area`.
///
/// Wheel scrolls the window (the selection follows only if it falls off
/// screen). A left click selects the row under the pointer; clicking the
/// expander glyph also toggles the node.
pub fn handle_tree_mouse<T>(
    view: &mut TreeViewState,
    tree: &mut Tree<T>,
    builder: &dyn TreeBuilder<T>,
    area: Rect,
    event: MouseEvent,
    wheel_lines: usize,
) -> bool {
    if !area.contains((event.column, event.row).into()) {
        return false;
    }
    let lines = wheel_lines as isize;
    match event.kind {
        MouseEventKind::ScrollDown => view.scroll_by(tree, lines),
        MouseEventKind::ScrollUp => view.scroll_by(tree, -lines),
        MouseEventKind::Down(MouseButton::Left) => {
            let row = event.row - area.y;
            let Some(id) = view.item_at_row(tree, row) else {
                return false;
            };
            // rows on screen are visible by construction
            let selected = view.select(tree, id).unwrap_or(false);
            let on_expander = view
                .visible_rows(tree, builder)
                .get(usize::from(row))
                .is_some_and(|r| usize::from(event.column - area.x) == r.expander_column());
            if on_expander {
                view.toggle_selected(tree, builder) || selected
            } else {
                selected
            }
        }
        _ => false,
    }
}
