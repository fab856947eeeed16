//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Lookups ignore the key event kind
/// and, for character keys, the SHIFT modifier (terminals disagree on
/// whether `G` or `$` arrive with SHIFT set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Empty bindings; every lookup misses.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key.code, key.modifiers)).copied()
    }

    /// Bind `code` + `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(normalize(code, modifiers), action);
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(_) => (code, modifiers - KeyModifiers::SHIFT),
        _ => (code, modifiers),
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut bindings = Self::empty();

        // Vim-style movement
        bindings.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        bindings.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        bindings.bind(KeyCode::Char('h'), none, KeyAction::ScrollLeft);
        bindings.bind(KeyCode::Char('l'), none, KeyAction::ScrollRight);
        bindings.bind(KeyCode::Char('g'), none, KeyAction::ScrollToTop);
        bindings.bind(KeyCode::Char('G'), none, KeyAction::ScrollToBottom);
        bindings.bind(KeyCode::Char('0'), none, KeyAction::LineStart);
        bindings.bind(KeyCode::Char('$'), none, KeyAction::LineEnd);

        // Arrow keys
        bindings.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        bindings.bind(KeyCode::Down, none, KeyAction::ScrollDown);
        bindings.bind(KeyCode::Left, none, KeyAction::ScrollLeft);
        bindings.bind(KeyCode::Right, none, KeyAction::ScrollRight);
        bindings.bind(KeyCode::Home, none, KeyAction::LineStart);
        bindings.bind(KeyCode::End, none, KeyAction::LineEnd);

        // Page navigation
        bindings.bind(KeyCode::Char('d'), ctrl, KeyAction::PageDown);
        bindings.bind(KeyCode::Char('u'), ctrl, KeyAction::PageUp);
        bindings.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        bindings.bind(KeyCode::PageUp, none, KeyAction::PageUp);

        // Tree
        bindings.bind(KeyCode::Enter, none, KeyAction::ToggleExpand);
        bindings.bind(KeyCode::Char(' '), none, KeyAction::ToggleExpand);
        bindings.bind(KeyCode::Char('m'), none, KeyAction::ToggleMark);
        bindings.bind(KeyCode::Char('+'), none, KeyAction::ExpandAll);
        bindings.bind(KeyCode::Char('-'), none, KeyAction::CollapseAll);

        // Hex view
        bindings.bind(KeyCode::Tab, none, KeyAction::ToggleSide);
        bindings.bind(KeyCode::Char('s'), ctrl, KeyAction::ApplyEdits);
        bindings.bind(KeyCode::Char('z'), ctrl, KeyAction::DiscardEdits);

        // Application controls
        bindings.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        bindings.bind(KeyCode::Char('c'), ctrl, KeyAction::Quit);

        bindings
    }
}
