//! Domain model types (pure).
//!
//! Value types shared by every viewport component: identifiers, errors,
//! change events, key actions and renderable cell values.

pub mod cell_value;
pub mod error;
pub mod event;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use cell_value::CellValue;
pub use error::CoreError;
pub use event::Change;
pub use identifiers::{ComponentId, NodeId};
pub use key_action::KeyAction;
