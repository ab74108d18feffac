use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::shape::RingView;

/// Node of a forest whose siblings form a closed ring.
///
/// `right` always points at a live node; a ring of one points back at itself.
#[derive(Debug)]
pub struct RingNode<T> {
    pub payload: T,
    /// Back reference, only used to find the start of the ring this node is in
    pub parent: Option<Index>,
    /// Entry point into the child ring
    pub child: Option<Index>,
    /// Next sibling in the circular ring
    pub right: Index,
}

/// Arena holding ring-linked nodes, the layout used by heap-ordered forests
/// (root lists and child lists are circular singly-linked rings).
///
/// This type only links nodes together. Ordering, merging and removal are the
/// business of whatever structure owns the arena.
#[derive(Debug)]
pub struct RingArena<T> {
    arena: Arena<RingNode<T>>,
}

impl<T> Default for RingArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RingArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Inserts a detached node forming a ring of one.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn insert(&mut self, payload: T) -> Index {
        self.arena.insert_with(|idx| RingNode {
            payload,
            parent: None,
            child: None,
            right: idx,
        })
    }

    /// Appends the detached node `child` at the end of `parent`'s child ring.
    ///
    /// Returns false if either index is stale, if `child` still has siblings,
    /// or if the existing ring does not close.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) -> bool {
        if parent == child || !self.arena.contains(parent) {
            return false;
        }
        match self.arena.get(child) {
            Some(node) if node.right == child && node.parent.is_none() => {}
            _ => return false,
        }

        let start = match self.arena.get(parent).and_then(|p| p.child) {
            Some(start) => start,
            None => {
                if let Some(p) = self.arena.get_mut(parent) {
                    p.child = Some(child);
                }
                if let Some(c) = self.arena.get_mut(child) {
                    c.parent = Some(parent);
                }
                return true;
            }
        };

        let Some(last) = self.last_in_ring(start) else {
            return false;
        };
        if let Some(l) = self.arena.get_mut(last) {
            l.right = child;
        }
        if let Some(c) = self.arena.get_mut(child) {
            c.right = start;
            c.parent = Some(parent);
        }
        trace!(?parent, ?child, "child appended to ring");
        true
    }

    /// Inserts `payload` as the last child of `parent`.
    pub fn push_child(&mut self, parent: Index, payload: T) -> Option<Index> {
        if !self.arena.contains(parent) {
            return None;
        }
        let child = self.insert(payload);
        if self.add_child(parent, child) {
            Some(child)
        } else {
            self.arena.remove(child);
            None
        }
    }

    /// Splices the detached node `node` into `anchor`'s ring directly after
    /// `anchor`. The node takes over `anchor`'s parent.
    #[instrument(level = "trace", skip(self))]
    pub fn add_sibling(&mut self, anchor: Index, node: Index) -> bool {
        if anchor == node {
            return false;
        }
        match self.arena.get(node) {
            Some(n) if n.right == node && n.parent.is_none() => {}
            _ => return false,
        }
        let Some((next, parent)) = self.arena.get(anchor).map(|a| (a.right, a.parent)) else {
            return false;
        };

        if let Some(a) = self.arena.get_mut(anchor) {
            a.right = node;
        }
        if let Some(n) = self.arena.get_mut(node) {
            n.right = next;
            n.parent = parent;
        }
        true
    }

    /// Follows `right` from `start` until the node pointing back at `start`.
    fn last_in_ring(&self, start: Index) -> Option<Index> {
        let mut current = start;
        for _ in 0..self.arena.len() {
            let next = self.arena.get(current)?.right;
            if next == start {
                return Some(current);
            }
            current = next;
        }
        None
    }

    pub fn get(&self, idx: Index) -> Option<&RingNode<T>> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut RingNode<T>> {
        self.arena.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// View showing the children of `root`.
    pub fn view(&self, root: Option<Index>) -> RingView<'_, T> {
        RingView::below(self, root)
    }

    /// View showing the ring entered at `entry`, e.g. a root list. The entry
    /// is taken as the start of its ring.
    pub fn ring_view(&self, entry: Option<Index>) -> RingView<'_, T> {
        RingView::ring(self, entry)
    }
}
