//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Each component interprets the navigation actions in its own terms: a
/// scroller moves its offset, a tree or table moves its selection, a hex
/// view moves its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Navigation
    /// One line/row/item up. Default: k/↑
    ScrollUp,
    /// One line/row/item down. Default: j/↓
    ScrollDown,
    /// One column/byte left, or collapse in a tree. Default: h/←
    ScrollLeft,
    /// One column/byte right, or expand in a tree. Default: l/→
    ScrollRight,
    /// One page up. Default: Ctrl+u/Page Up
    PageUp,
    /// One page down. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the start. Default: g
    ScrollToTop,
    /// Jump to the end. Default: G
    ScrollToBottom,
    /// Start of the current line or row. Default: 0/Home
    LineStart,
    /// End of the current line or row. Default: $/End
    LineEnd,

    // Tree
    /// Toggle expansion of the selected node. Default: Enter/Space
    ToggleExpand,
    /// Expand every node. Default: +
    ExpandAll,
    /// Collapse every node. Default: -
    CollapseAll,
    /// Toggle the mark on the selected node. Default: m
    ToggleMark,

    // Hex view
    /// Switch between the hex and text panes. Default: Tab
    ToggleSide,
    /// Write pending edits to the stream. Default: Ctrl+s
    ApplyEdits,
    /// Drop pending edits. Default: Ctrl+z
    DiscardEdits,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action only moves the viewport or cursor.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::ScrollLeft
                | KeyAction::ScrollRight
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
                | KeyAction::LineStart
                | KeyAction::LineEnd
        )
    }
}
