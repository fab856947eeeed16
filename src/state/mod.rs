//! Input handling (pure).
//!
//! Each handler maps a `KeyAction` or crossterm `MouseEvent` onto one
//! view-state component. Handlers never touch the terminal, so every
//! transition is testable without a TUI.

pub mod grab;
pub mod hex_handler;
pub mod scroll_handler;
pub mod table_handler;
pub mod tree_handler;

// Re-export for convenience
pub use grab::{GrabInfo, PointerGrab};
pub use hex_handler::{handle_hex_action, handle_hex_char, handle_hex_mouse};
pub use scroll_handler::{bar_at, handle_scroll_action, handle_scroll_mouse, BarTarget};
pub use table_handler::{handle_table_action, handle_table_mouse};
pub use tree_handler::{handle_tree_action, handle_tree_mouse};
