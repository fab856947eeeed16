//! Core identifier newtypes.
//!
//! Identifiers are opaque indices handed out by their owners. Raw
//! constructors stay crate-private so callers can only obtain ids from the
//! structure that owns them.

use std::fmt;

/// Handle to a node stored in a [`Tree`](crate::view_state::tree::Tree) arena.
///
/// Parent links are stored as `NodeId`s, never as owning pointers, so the
/// tree can't form reference cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap an arena index. Only the tree hands these out.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in its arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies a component that can own the pointer grab while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Create a component id. Hosts pick one per on-screen component.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component-{}", self.0)
    }
}
