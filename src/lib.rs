//! vport
//!
//! Viewport virtualization and navigation for terminal UIs: a 2D scroller
//! with proportional scroll bars, a lazily loaded tree view, a column
//! negotiating table view and a hex view with a pending-edit overlay.
//!
//! Layered as a pure core (`model`, `view_state`, `state`) behind an impure
//! shell (`source`, `view`, `config`, `logging`).

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod tests;
