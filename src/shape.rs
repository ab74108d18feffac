//! Shape adapters: the read-only interface both renderers walk through.
//!
//! A shape answers two questions about a node: which nodes hang below it, in
//! display order, and whether it is the last among its siblings.

use std::fmt;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::{RingArena, TreeArena};
use crate::errors::{RenderError, RenderResult};

pub trait Shape {
    type Node: Copy + Eq + fmt::Debug;
    type Payload: fmt::Display;

    /// Payload of `node`, or None if the handle does not resolve.
    fn payload(&self, node: Self::Node) -> Option<&Self::Payload>;

    /// Ordered children of `node`; empty for a leaf.
    fn children_of(&self, node: Self::Node) -> RenderResult<Vec<Self::Node>>;

    /// Whether `node` is the final sibling at its level, answered from the
    /// node's own links. [`crate::walk::Walk`] does not rely on it: during a
    /// walk the flag comes from the node's position in `children_of`.
    fn is_last(&self, node: Self::Node) -> bool;

    /// Number of nodes the shape can reach at most.
    fn node_count(&self) -> usize;
}

/// Adapter over an ordered-children tree.
#[derive(Debug)]
pub struct TreeView<'a, T> {
    tree: &'a TreeArena<T>,
}

impl<'a, T> TreeView<'a, T> {
    pub fn new(tree: &'a TreeArena<T>) -> Self {
        Self { tree }
    }

    pub fn root(&self) -> Option<Index> {
        self.tree.root()
    }
}

impl<T: fmt::Display> Shape for TreeView<'_, T> {
    type Node = Index;
    type Payload = T;

    fn payload(&self, node: Index) -> Option<&T> {
        self.tree.get_node(node).map(|n| &n.payload)
    }

    fn children_of(&self, node: Index) -> RenderResult<Vec<Index>> {
        self.tree
            .get_node(node)
            .map(|n| n.children.clone())
            .ok_or_else(|| RenderError::malformed(format!("dangling child link {node:?}")))
    }

    fn is_last(&self, node: Index) -> bool {
        let parent = self.tree.get_node(node).and_then(|n| n.parent);
        match parent.and_then(|p| self.tree.get_node(p)) {
            Some(p) => p.children.last() == Some(&node),
            None => true,
        }
    }

    fn node_count(&self) -> usize {
        self.tree.len()
    }
}

/// Adapter over circular sibling rings.
///
/// `top` is the entry of the outermost ring shown. Nodes without a parent are
/// taken to live in that ring.
#[derive(Debug)]
pub struct RingView<'a, T> {
    arena: &'a RingArena<T>,
    root: Option<Index>,
    top: Option<Index>,
}

impl<'a, T> RingView<'a, T> {
    pub(crate) fn below(arena: &'a RingArena<T>, root: Option<Index>) -> Self {
        let top = root.and_then(|r| arena.get(r)).and_then(|n| n.child);
        Self { arena, root, top }
    }

    pub(crate) fn ring(arena: &'a RingArena<T>, entry: Option<Index>) -> Self {
        Self {
            arena,
            root: None,
            top: entry,
        }
    }

    /// Conceptual root whose children are shown, if any.
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Members of the outermost ring, starting at its entry.
    pub fn roots(&self) -> RenderResult<Vec<Index>> {
        match self.top {
            Some(start) => self.ring_from(start),
            None => Ok(Vec::new()),
        }
    }

    /// Collects a ring by following `right` until it returns to `start`.
    ///
    /// A ring cannot hold more members than the arena has nodes, so walking
    /// further than that means the ring never closes.
    #[instrument(level = "trace", skip(self))]
    fn ring_from(&self, start: Index) -> RenderResult<Vec<Index>> {
        let limit = self.arena.len();
        let mut members = Vec::new();
        let mut current = start;

        loop {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| RenderError::malformed(format!("dangling ring link {current:?}")))?;
            members.push(current);
            if node.right == start {
                return Ok(members);
            }
            if members.len() >= limit {
                return Err(RenderError::malformed(format!(
                    "sibling ring starting at {start:?} does not close within {limit} steps"
                )));
            }
            current = node.right;
        }
    }
}

impl<T: fmt::Display> Shape for RingView<'_, T> {
    type Node = Index;
    type Payload = T;

    fn payload(&self, node: Index) -> Option<&T> {
        self.arena.get(node).map(|n| &n.payload)
    }

    fn children_of(&self, node: Index) -> RenderResult<Vec<Index>> {
        let entry = self
            .arena
            .get(node)
            .ok_or_else(|| RenderError::malformed(format!("dangling child link {node:?}")))?
            .child;
        match entry {
            Some(start) => self.ring_from(start),
            None => Ok(Vec::new()),
        }
    }

    /// Ring start is `parent.child`, or the top entry for parentless nodes.
    fn is_last(&self, node: Index) -> bool {
        let Some(n) = self.arena.get(node) else {
            return false;
        };
        let start = match n.parent {
            Some(p) => self.arena.get(p).and_then(|p| p.child),
            None => self.top,
        };
        start == Some(n.right)
    }

    fn node_count(&self) -> usize {
        self.arena.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    #[test]
    fn test_tree_view_last_child() {
        let tree: TreeArena<char> = Node::new('a')
            .with_children([Node::leaf('b'), Node::leaf('c')])
            .into();
        let view = TreeView::new(&tree);
        let root = view.root().unwrap();
        let children = view.children_of(root).unwrap();

        assert!(view.is_last(root));
        assert!(!view.is_last(children[0]));
        assert!(view.is_last(children[1]));
    }

    #[test]
    fn test_ring_view_single_member_is_last() {
        let mut arena = RingArena::new();
        let root = arena.insert("root");
        let only = arena.push_child(root, "only").unwrap();
        let view = arena.view(Some(root));

        assert_eq!(view.roots().unwrap(), vec![only]);
        assert!(view.is_last(only));
    }

    #[test]
    fn test_ring_view_detects_unclosed_ring() {
        let mut arena = RingArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.add_sibling(a, b);
        arena.add_sibling(b, c);
        // c -> b skips a, so walking from a never returns
        arena.get_mut(c).unwrap().right = b;

        let err = arena.ring_view(Some(a)).roots().unwrap_err();
        assert!(matches!(err, RenderError::MalformedStructure(_)));
    }
}
