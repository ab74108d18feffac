use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::shape::TreeView;

/// Owned tree value used to describe a shape before it is moved into an arena.
///
/// ```
/// use treeglyph::domain::{Node, TreeArena};
///
/// let tree: TreeArena<&str> = Node::new("a")
///     .with_children([Node::leaf("b"), Node::leaf("c")])
///     .into();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub payload: T,
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            children: Vec::new(),
        }
    }

    pub fn leaf(payload: T) -> Self {
        Self::new(payload)
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node<T>>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode<T> {
    pub payload: T,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in display order
    pub children: Vec<Index>,
}

impl<T> TreeNode<T> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based ordered tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Nodes never own each other; `parent` and `children` are indices, so the
/// back reference cannot form a retain cycle.
#[derive(Debug)]
pub struct TreeArena<T> {
    arena: Arena<TreeNode<T>>,
    root: Option<Index>,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a node below `parent`, appending it after existing siblings.
    ///
    /// Passing `None` makes the node the root. A stale `parent` index leaves
    /// the node detached.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn insert_node(&mut self, payload: T, parent: Option<Index>) -> Index {
        let node = TreeNode {
            payload,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn view(&self) -> TreeView<'_, T> {
        TreeView::new(self)
    }

    /// Pre-order iteration from the root.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    /// Height of the tree: 1 for a lone root, 0 for an empty arena.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();

        while let Some((idx, level)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                max_depth = max_depth.max(level);
                stack.extend(node.children.iter().map(|&child| (child, level + 1)));
            }
        }
        max_depth
    }

    /// Payloads of all leaf nodes in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<&T> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| &node.payload)
            .collect()
    }
}

impl<T> From<Node<T>> for TreeArena<T> {
    fn from(root: Node<T>) -> Self {
        let mut tree = TreeArena::new();
        let mut stack = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let Node { payload, children } = node;
            let idx = tree.insert_node(payload, parent);
            // Reverse so the first child is inserted (and thus ordered) first
            for child in children.into_iter().rev() {
                stack.push((child, Some(idx)));
            }
        }
        tree
    }
}

pub struct TreeIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
