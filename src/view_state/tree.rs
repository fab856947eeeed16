//! Arena-backed tree with expand/collapse state and lazy children.
//!
//! Nodes live in a `Vec` owned by [`Tree`]; parent links are [`NodeId`]
//! indices used only for upward traversal. The root is always expanded.
//!
//! # Flattening
//! [`Tree::visible_items`] walks the tree depth-first in pre-order and only
//! descends into expanded nodes. The list is rebuilt on every call and is
//! never cached, so it can't go stale after an expand or collapse.
//!
//! # Navigation
//! [`Tree::move_next`] and [`Tree::move_previous`] work on the tree itself
//! (cost proportional to depth and sibling count, not tree size) and agree
//! with the order of `visible_items`.

use crate::model::{CoreError, NodeId};

/// Supplies children on demand for lazily expanded trees.
pub trait TreeBuilder<T> {
    /// Whether `data` may have children (drives the expander glyph before
    /// the children have been loaded).
    fn can_expand(&self, data: &T) -> bool;

    /// Load the children of `data`, in display order.
    fn children(&self, data: &T) -> Vec<T>;
}

/// Builder for trees whose children are all added up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticChildren;

impl<T> TreeBuilder<T> for StaticChildren {
    fn can_expand(&self, _data: &T) -> bool {
        false
    }

    fn children(&self, _data: &T) -> Vec<T> {
        Vec::new()
    }
}

/// One node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    expanded: bool,
    marked: bool,
    children_loaded: bool,
}

impl<T> TreeNode<T> {
    fn new(data: T, parent: Option<NodeId>) -> Self {
        Self {
            data,
            parent,
            children: Vec::new(),
            expanded: false,
            marked: false,
            children_loaded: false,
        }
    }

    /// Payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Expansion flag.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Mark flag.
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// A tree of `T` stored in an arena.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<TreeNode<T>>,
}

impl<T> Tree<T> {
    /// Create a tree holding only `root`.
    pub fn new(root: T) -> Self {
        let mut node = TreeNode::new(root, None);
        node.expanded = true;
        Self { nodes: vec![node] }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Total number of nodes, visible or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `id` belongs to this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.nodes.get(id.index())
    }

    /// Payload of a node.
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(TreeNode::data)
    }

    /// Mutable payload of a node.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.data)
    }

    /// Append a child under `parent`.
    pub fn add_child(&mut self, parent: NodeId, data: T) -> Result<NodeId, CoreError> {
        if !self.contains(parent) {
            return Err(CoreError::UnknownNode(parent));
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(TreeNode::new(data, Some(parent)));
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.children.push(id);
        parent_node.children_loaded = true;
        Ok(id)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(TreeNode::parent)
    }

    /// Children of a node (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Whether the node has loaded children.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// Distance from the root (root is 0).
    pub fn depth(&self, id: NodeId) -> usize {
        std::iter::successors(self.parent(id), |&p| self.parent(p)).count()
    }

    /// Whether the node is expanded.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(TreeNode::is_expanded)
    }

    /// Whether the node is marked.
    pub fn is_marked(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(TreeNode::is_marked)
    }

    /// Whether the node can be expanded: it has children, or (before they
    /// are loaded) the builder says it may.
    pub fn can_expand(&self, id: NodeId, builder: &dyn TreeBuilder<T>) -> bool {
        match self.node(id) {
            Some(node) if node.children_loaded => !node.children.is_empty(),
            Some(node) => builder.can_expand(&node.data),
            None => false,
        }
    }

    /// Set the expansion flag. Returns whether it changed.
    ///
    /// The root can't be collapsed.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        if id == self.root() && !expanded {
            return false;
        }
        match self.nodes.get_mut(id.index()) {
            Some(node) if node.expanded != expanded => {
                node.expanded = expanded;
                true
            }
            _ => false,
        }
    }

    /// Expand a node without loading children.
    pub fn expand(&mut self, id: NodeId) -> bool {
        self.set_expanded(id, true)
    }

    /// Collapse a node.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        self.set_expanded(id, false)
    }

    /// Flip the expansion flag of a loaded node.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let expanded = self.is_expanded(id);
        self.set_expanded(id, !expanded)
    }

    /// Load children through `builder` (once), then expand.
    ///
    /// Returns whether the expansion flag changed.
    pub fn expand_with(&mut self, id: NodeId, builder: &dyn TreeBuilder<T>) -> bool {
        self.load_children(id, builder);
        if !self.has_children(id) {
            return false;
        }
        self.expand(id)
    }

    /// Fetch children through `builder` if they haven't been loaded yet.
    ///
    /// Returns the number of children added.
    pub fn load_children(&mut self, id: NodeId, builder: &dyn TreeBuilder<T>) -> usize {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return 0;
        };
        if node.children_loaded {
            return 0;
        }
        node.children_loaded = true;
        let children = builder.children(&node.data);
        let count = children.len();
        for child in children {
            let child_id = NodeId::new(self.nodes.len());
            self.nodes.push(TreeNode::new(child, Some(id)));
            self.nodes[id.index()].children.push(child_id);
        }
        count
    }

    /// Expand every node that has children.
    pub fn expand_all(&mut self) {
        for node in &mut self.nodes {
            if !node.children.is_empty() {
                node.expanded = true;
            }
        }
    }

    /// Collapse every node except the root.
    pub fn collapse_all(&mut self) {
        for node in self.nodes.iter_mut().skip(1) {
            node.expanded = false;
        }
    }

    /// Set the mark flag. Returns whether it changed.
    pub fn set_mark(&mut self, id: NodeId, marked: bool) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(node) if node.marked != marked => {
                node.marked = marked;
                true
            }
            _ => false,
        }
    }

    /// Flip the mark flag.
    pub fn toggle_mark(&mut self, id: NodeId) -> bool {
        let marked = self.is_marked(id);
        self.set_mark(id, !marked)
    }

    /// Marked nodes in insertion order.
    pub fn marked(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].marked)
            .map(NodeId::new)
            .collect()
    }

    /// Depth-first pre-order list of nodes not hidden by a collapsed ancestor.
    pub fn visible_items(&self) -> Vec<NodeId> {
        let mut items = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            items.push(id);
            let node = &self.nodes[id.index()];
            if node.expanded {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        items
    }

    /// Index of `id` in a freshly computed [`visible_items`](Self::visible_items).
    pub fn visible_index_of(&self, id: NodeId) -> Option<usize> {
        self.visible_items().iter().position(|&n| n == id)
    }

    /// True unless some ancestor of `id` is collapsed.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        std::iter::successors(self.parent(id), |&p| self.parent(p)).all(|a| self.is_expanded(a))
    }

    /// The node after `id` in visible order, or `None` at the end.
    pub fn move_next(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if node.expanded {
            if let Some(&first) = node.children.first() {
                return Some(first);
            }
        }
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let siblings = self.children(parent);
            if let Some(pos) = siblings.iter().position(|&s| s == current) {
                if let Some(&next) = siblings.get(pos + 1) {
                    return Some(next);
                }
            }
            current = parent;
        }
        None
    }

    /// The node before `id` in visible order, or `None` for the root.
    pub fn move_previous(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        match siblings.iter().position(|&s| s == id) {
            Some(0) | None => Some(parent),
            Some(pos) => Some(self.last_visible_descendant(siblings[pos - 1])),
        }
    }

    /// Follow last children down while nodes are expanded.
    pub fn last_visible_descendant(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(node) = self.node(current) {
            match node.children.last() {
                Some(&last) if node.expanded => current = last,
                _ => break,
            }
        }
        current
    }

    /// Closest node at or above `id` that is visible.
    pub fn nearest_visible(&self, id: NodeId) -> NodeId {
        std::iter::successors(Some(id), |&n| self.parent(n))
            .find(|&n| self.is_visible(n))
            .unwrap_or_else(|| self.root())
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
