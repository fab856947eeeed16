//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive `TuiApp` through its crate-private test hooks with a
//! `TestBackend`, so key routing, mouse routing and full frames can be
//! checked without a real terminal.

mod tui_app;
