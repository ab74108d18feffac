//! Iterative pre-order traversal shared by all renderers.
//!
//! The walk keeps an explicit stack of frames instead of recursing, so the
//! height of the rendered structure is bounded by heap memory rather than by
//! the call stack. Every node entered counts as one step; exceeding the step
//! budget means a child link loops back on itself.
//!
//! Whether a node is the last of its siblings comes from its position in the
//! sequence returned by `Shape::children_of` (or in the start list), never
//! from parent links.

use tracing::{debug, instrument, trace, warn};

use crate::errors::{RenderError, RenderResult};
use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'s, N, P> {
    /// Node visited before its descendants.
    Enter {
        node: N,
        payload: &'s P,
        /// Levels below the starting nodes (which sit at 0)
        depth: usize,
        last: bool,
        leaf: bool,
    },
    /// Emitted after all descendants of a node that has children.
    Leave { node: N, depth: usize },
}

#[derive(Debug)]
enum Frame<N> {
    Enter { node: N, depth: usize, last: bool },
    Leave { node: N, depth: usize },
}

/// Pushes `nodes` so that the first one is popped first, flagging the final one.
fn push_level<N>(stack: &mut Vec<Frame<N>>, nodes: Vec<N>, depth: usize) {
    let count = nodes.len();
    stack.extend(
        nodes
            .into_iter()
            .enumerate()
            .rev()
            .map(|(i, node)| Frame::Enter {
                node,
                depth,
                last: i + 1 == count,
            }),
    );
}

pub struct Walk<'s, S: Shape> {
    shape: &'s S,
    stack: Vec<Frame<S::Node>>,
    steps: usize,
    max_steps: usize,
    failed: bool,
}

impl<'s, S: Shape> Walk<'s, S> {
    /// Starts a walk over `starts`, in order, each at depth 0.
    ///
    /// `max_steps` defaults to the shape's node count.
    #[instrument(level = "trace", skip(shape, starts))]
    pub fn new(shape: &'s S, starts: Vec<S::Node>, max_steps: Option<usize>) -> Self {
        let mut stack = Vec::with_capacity(starts.len());
        push_level(&mut stack, starts, 0);
        Self {
            shape,
            stack,
            steps: 0,
            max_steps: max_steps.unwrap_or_else(|| shape.node_count()),
            failed: false,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn fail(&mut self, err: RenderError) -> Option<RenderResult<Event<'s, S::Node, S::Payload>>> {
        warn!(%err, steps = self.steps, "walk aborted");
        self.failed = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl<'s, S: Shape> Iterator for Walk<'s, S> {
    type Item = RenderResult<Event<'s, S::Node, S::Payload>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (node, depth, last) = match self.stack.pop()? {
            Frame::Leave { node, depth } => return Some(Ok(Event::Leave { node, depth })),
            Frame::Enter { node, depth, last } => (node, depth, last),
        };

        self.steps += 1;
        if self.steps > self.max_steps {
            let max = self.max_steps;
            return self.fail(RenderError::malformed(format!(
                "traversal exceeded {max} steps; a child link does not terminate"
            )));
        }

        let shape = self.shape;
        let Some(payload) = shape.payload(node) else {
            return self.fail(RenderError::malformed(format!("dangling node reference {node:?}")));
        };
        let children = match shape.children_of(node) {
            Ok(children) => children,
            Err(err) => return self.fail(err),
        };

        let leaf = children.is_empty();
        if !leaf {
            self.stack.push(Frame::Leave { node, depth });
            push_level(&mut self.stack, children, depth + 1);
        }
        if last != shape.is_last(node) {
            debug!(?node, last, "parent links disagree with sibling order");
        }
        trace!(?node, depth, last, leaf, "enter");

        Some(Ok(Event::Enter {
            node,
            payload,
            depth,
            last,
            leaf,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, TreeArena};

    fn names<N, P: std::fmt::Display>(events: &[Event<'_, N, P>]) -> Vec<String> {
        events
            .iter()
            .map(|e| match e {
                Event::Enter { payload, .. } => format!("+{payload}"),
                Event::Leave { .. } => "-".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_walk_emits_preorder_with_leave_for_inner_nodes() {
        let tree: TreeArena<&str> = Node::new("a")
            .with_children([
                Node::leaf("b"),
                Node::new("c").with_children([Node::leaf("e")]),
            ])
            .into();
        let view = tree.view();
        let events: Vec<_> = Walk::new(&view, vec![tree.root().unwrap()], None)
            .collect::<RenderResult<_>>()
            .unwrap();

        assert_eq!(names(&events), vec!["+a", "+b", "+c", "+e", "-", "-"]);
    }

    #[test]
    fn test_walk_step_budget() {
        let tree: TreeArena<&str> = Node::new("a")
            .with_children([Node::leaf("b"), Node::leaf("c")])
            .into();
        let view = tree.view();
        let mut walk = Walk::new(&view, vec![tree.root().unwrap()], Some(2));

        assert!(walk.next().unwrap().is_ok());
        assert!(walk.next().unwrap().is_ok());
        assert!(matches!(
            walk.next(),
            Some(Err(RenderError::MalformedStructure(_)))
        ));
        assert!(walk.next().is_none());
        assert_eq!(walk.steps(), 3);
    }

    #[test]
    fn test_last_flag_follows_start_order() {
        let tree: TreeArena<&str> = Node::new("a")
            .with_children([Node::leaf("b"), Node::leaf("c")])
            .into();
        let view = tree.view();
        let children = view.children_of(tree.root().unwrap()).unwrap();
        // reversed start list: "b" is now emitted last and must carry the flag
        let starts = vec![children[1], children[0]];
        let flags: Vec<(String, bool)> = Walk::new(&view, starts, None)
            .map(|e| match e.unwrap() {
                Event::Enter { payload, last, .. } => (payload.to_string(), last),
                Event::Leave { .. } => unreachable!("leaves only"),
            })
            .collect();

        assert_eq!(
            flags,
            vec![("c".to_string(), false), ("b".to_string(), true)]
        );
    }
}
