//! View-state layer - scrolling, flattening and cursor state
//!
//! Everything here is pure state plus arithmetic: no terminal I/O, no
//! rendering. Hosts push sizes in, call operations, then read back what to
//! draw and drain the event queues.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (ViewportSize, ContentExtent, ViewportOffset, Axis)
//! - `scrollbar`: ScrollBarState - thumb geometry and its inverse
//! - `scroller`: ViewportScroller - 2D offset with auto-hiding bars
//! - `tree`: Tree - arena tree, flattening and sibling navigation
//! - `tree_view`: TreeViewState - selection coupled to a fixed-height window
//! - `table`: TableViewState - column negotiation and cell cursor
//! - `hex`: HexViewState - seekable stream with a pending-edit overlay

pub mod hex;
pub mod scrollbar;
pub mod scroller;
pub mod table;
pub mod tree;
pub mod tree_view;
pub mod types;

pub use hex::{
    bytes_per_line_for, hex_column, text_column, EditOverlay, HexCell, HexEvent, HexRow,
    HexViewState, Side,
};
pub use scrollbar::{BarHit, ScrollBarPolicy, ScrollBarState};
pub use scroller::{ScrollEvent, ViewportScroller};
pub use table::{
    fit_columns, plan_columns, truncate_to_width, CellPosition, ColumnPlan, ColumnToRender,
    TableEvent, TableSource, TableStyle, TableViewState, VecTable,
};
pub use tree::{StaticChildren, Tree, TreeBuilder, TreeNode};
pub use tree_view::{TreeEvent, TreeRow, TreeViewState, INDENT_WIDTH};
pub use types::{Axis, ContentExtent, ViewportOffset, ViewportSize, VisibleWindow};
