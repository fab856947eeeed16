//! Selection and scroll state for a tree shown in a fixed-height viewport.
//!
//! # Invariant
//! The selection's index in `tree.visible_items()` lies in
//! `[index(top), index(top) + height)`. When a move takes the selection out
//! of that window, the top item snaps straight to the selection.
//!
//! The tree is passed into every call rather than owned, so the same tree can
//! back several views. Callers that expand or collapse nodes behind the
//! view's back must call [`TreeViewState::after_structure_change`] before the
//! next index-based read.

use super::tree::{Tree, TreeBuilder};
use super::types::offset_by;
use crate::model::{Change, CoreError, NodeId};
use tracing::debug;

/// Notifications emitted by [`TreeViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent {
    /// The selected node changed.
    SelectionChanged(Change<Option<NodeId>>),
    /// A node was expanded or collapsed through the view.
    ExpansionChanged {
        /// Node whose flag changed.
        node: NodeId,
        /// New flag value.
        expanded: bool,
    },
}

/// Screen cells of indentation per tree level.
pub const INDENT_WIDTH: usize = 2;

/// Everything the renderer needs to draw one tree row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow {
    /// Node on this row.
    pub id: NodeId,
    /// Indentation level.
    pub depth: usize,
    /// Expansion flag.
    pub expanded: bool,
    /// Whether an expander glyph should be drawn.
    pub expandable: bool,
    /// Mark flag.
    pub marked: bool,
    /// Whether this is the selected row.
    pub selected: bool,
}

impl TreeRow {
    /// Column of the expander glyph, relative to the row start.
    pub fn expander_column(&self) -> usize {
        self.depth * INDENT_WIDTH
    }
}

/// Cursor and top-of-window state for a tree view.
#[derive(Debug, Clone)]
pub struct TreeViewState {
    selected: Option<NodeId>,
    top: NodeId,
    height: u16,
    events: Vec<TreeEvent>,
    needs_display: bool,
}

impl TreeViewState {
    /// A view with the root selected and at the top.
    pub fn new<T>(tree: &Tree<T>) -> Self {
        Self {
            selected: Some(tree.root()),
            top: tree.root(),
            height: 0,
            events: Vec::new(),
            needs_display: true,
        }
    }

    /// Selected node.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// First node on screen.
    pub fn top_item(&self) -> NodeId {
        self.top
    }

    /// Viewport height in rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Push a new viewport height.
    pub fn set_height<T>(&mut self, tree: &Tree<T>, height: u16) {
        if self.height != height {
            self.height = height;
            self.needs_display = true;
            self.ensure_selection_visible(tree);
        }
    }

    /// Select a node by id.
    ///
    /// Errors if the node is unknown or hidden by a collapsed ancestor.
    /// Returns whether the selection changed.
    pub fn select<T>(&mut self, tree: &Tree<T>, id: NodeId) -> Result<bool, CoreError> {
        if !tree.contains(id) {
            return Err(CoreError::UnknownNode(id));
        }
        if !tree.is_visible(id) {
            return Err(CoreError::HiddenNode(id));
        }
        Ok(self.set_selection(tree, Some(id)))
    }

    /// Move to the next visible node.
    pub fn select_next<T>(&mut self, tree: &Tree<T>) -> bool {
        match self.selected.and_then(|id| tree.move_next(id)) {
            Some(next) => self.set_selection(tree, Some(next)),
            None => false,
        }
    }

    /// Move to the previous visible node.
    pub fn select_previous<T>(&mut self, tree: &Tree<T>) -> bool {
        match self.selected.and_then(|id| tree.move_previous(id)) {
            Some(prev) => self.set_selection(tree, Some(prev)),
            None => false,
        }
    }

    /// Move the selection one page down.
    pub fn page_down<T>(&mut self, tree: &Tree<T>) -> bool {
        self.move_by_rows(tree, self.page_len() as isize)
    }

    /// Move the selection one page up.
    pub fn page_up<T>(&mut self, tree: &Tree<T>) -> bool {
        self.move_by_rows(tree, -(self.page_len() as isize))
    }

    /// Select the root.
    pub fn select_first<T>(&mut self, tree: &Tree<T>) -> bool {
        self.set_selection(tree, Some(tree.root()))
    }

    /// Select the last visible node.
    pub fn select_last<T>(&mut self, tree: &Tree<T>) -> bool {
        let last = tree.last_visible_descendant(tree.root());
        self.set_selection(tree, Some(last))
    }

    /// Collapse the selection, or step to its parent if it is already
    /// collapsed (or childless).
    pub fn cursor_left<T>(&mut self, tree: &mut Tree<T>) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if tree.is_expanded(id) && tree.has_children(id) && tree.collapse(id) {
            self.record_expansion(tree, id, false);
            return true;
        }
        match tree.parent(id) {
            Some(parent) => self.set_selection(tree, Some(parent)),
            None => false,
        }
    }

    /// Expand the selection, or step to its first child if it is already
    /// expanded.
    pub fn cursor_right<T>(&mut self, tree: &mut Tree<T>, builder: &dyn TreeBuilder<T>) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if !tree.is_expanded(id) {
            if tree.expand_with(id, builder) {
                self.record_expansion(tree, id, true);
                return true;
            }
            return false;
        }
        match tree.children(id).first().copied() {
            Some(child) => self.set_selection(tree, Some(child)),
            None => false,
        }
    }

    /// Expand or collapse the selection.
    pub fn toggle_selected<T>(&mut self, tree: &mut Tree<T>, builder: &dyn TreeBuilder<T>) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let changed = if tree.is_expanded(id) {
            tree.collapse(id)
        } else {
            tree.expand_with(id, builder)
        };
        if changed {
            let expanded = tree.is_expanded(id);
            self.record_expansion(tree, id, expanded);
        }
        changed
    }

    /// Flip the mark on the selection.
    pub fn toggle_mark_selected<T>(&mut self, tree: &mut Tree<T>) -> bool {
        let changed = self.selected.is_some_and(|id| tree.toggle_mark(id));
        if changed {
            self.needs_display = true;
        }
        changed
    }

    /// Scroll the window by `rows` without a keyboard move.
    ///
    /// The top index is clamped to `[0, len - height]`; if the selection falls
    /// off-screen it is pulled to the nearest on-screen row.
    pub fn scroll_by<T>(&mut self, tree: &Tree<T>, rows: isize) -> bool {
        let items = tree.visible_items();
        let top_index = self.top_index(&items);
        let max_top = items.len().saturating_sub(self.page_len());
        let new_top = offset_by(top_index, rows).min(max_top);
        if new_top == top_index {
            return false;
        }
        self.top = items[new_top];
        self.needs_display = true;

        if let Some(sel_index) = self.selected_index(&items) {
            let last_on_screen = (new_top + self.page_len()).min(items.len()) - 1;
            let clamped = sel_index.clamp(new_top, last_on_screen);
            if clamped != sel_index {
                self.replace_selection(Some(items[clamped]));
            }
        }
        true
    }

    /// Re-establish invariants after expand/collapse done outside the view.
    ///
    /// A selection or top item hidden by a collapse snaps to its nearest
    /// visible ancestor.
    pub fn after_structure_change<T>(&mut self, tree: &Tree<T>) {
        if !tree.contains(self.top) || !tree.is_visible(self.top) {
            self.top = tree.nearest_visible(self.top);
        }
        if let Some(id) = self.selected {
            let target = if tree.contains(id) {
                tree.nearest_visible(id)
            } else {
                tree.root()
            };
            if target != id {
                debug!(hidden = %id, now = %target, "selection hidden by collapse");
                self.replace_selection(Some(target));
            }
        }
        self.needs_display = true;
        self.ensure_selection_visible(tree);
    }

    /// Node drawn on screen row `row`.
    pub fn item_at_row<T>(&self, tree: &Tree<T>, row: u16) -> Option<NodeId> {
        if row >= self.height {
            return None;
        }
        let items = tree.visible_items();
        items.get(self.top_index(&items) + row as usize).copied()
    }

    /// Rows currently on screen, top to bottom.
    pub fn visible_rows<T>(&self, tree: &Tree<T>, builder: &dyn TreeBuilder<T>) -> Vec<TreeRow> {
        let items = tree.visible_items();
        let start = self.top_index(&items);
        items
            .iter()
            .skip(start)
            .take(self.height as usize)
            .map(|&id| TreeRow {
                id,
                depth: tree.depth(id),
                expanded: tree.is_expanded(id),
                expandable: tree.can_expand(id, builder),
                marked: tree.is_marked(id),
                selected: self.selected == Some(id),
            })
            .collect()
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<TreeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether something on screen changed since the last call.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    fn page_len(&self) -> usize {
        (self.height as usize).max(1)
    }

    fn top_index(&self, items: &[NodeId]) -> usize {
        items.iter().position(|&n| n == self.top).unwrap_or(0)
    }

    fn selected_index(&self, items: &[NodeId]) -> Option<usize> {
        let selected = self.selected?;
        items.iter().position(|&n| n == selected)
    }

    fn move_by_rows<T>(&mut self, tree: &Tree<T>, rows: isize) -> bool {
        let items = tree.visible_items();
        let Some(current) = self.selected_index(&items) else {
            return false;
        };
        let target = offset_by(current, rows).min(items.len() - 1);
        self.set_selection(tree, Some(items[target]))
    }

    fn set_selection<T>(&mut self, tree: &Tree<T>, id: Option<NodeId>) -> bool {
        if !self.replace_selection(id) {
            return false;
        }
        self.ensure_selection_visible(tree);
        true
    }

    fn replace_selection(&mut self, id: Option<NodeId>) -> bool {
        let Some(change) = Change::between(self.selected, id) else {
            return false;
        };
        self.selected = id;
        self.events.push(TreeEvent::SelectionChanged(change));
        self.needs_display = true;
        true
    }

    fn record_expansion<T>(&mut self, tree: &Tree<T>, node: NodeId, expanded: bool) {
        self.events.push(TreeEvent::ExpansionChanged { node, expanded });
        self.after_structure_change(tree);
    }

    fn ensure_selection_visible<T>(&mut self, tree: &Tree<T>) {
        let items = tree.visible_items();
        let Some(sel_index) = self.selected_index(&items) else {
            return;
        };
        let top_index = self.top_index(&items);
        if sel_index < top_index || sel_index >= top_index + self.page_len() {
            self.top = items[sel_index];
            self.needs_display = true;
        }
    }
}

#[cfg(test)]
#[path = "tree_view_tests.rs"]
mod tests;
